//! runs one `ShuffleGuessGame` episode against a chosen dealer and prints
//! the final payoff. developer tooling, not a service.

use clap::Parser;
use colored::Colorize;
use dealerlab::{registry, Encoding, GameConfig, Params, ShuffleGuessGame};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(name = "dealerlab", about = "Deal a dealer through a shuffle-guess episode")]
struct Args {
    /// which dealer to run: bitmap, fisher_yates, adaptive, perfect.
    #[arg(long, default_value = "fisher_yates")]
    dealer: String,

    /// number of cards to deal.
    #[arg(short = 'n', long, default_value_t = 104)]
    n: usize,

    /// random seed for the episode.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// memory budget in bits, used by the adaptive-threshold dealer.
    #[arg(long, default_value_t = 64)]
    m_bits: u32,
}

fn main() {
    dealerlab::init_logging();
    let args = Args::parse();

    let dealer = match registry::get_dealer(&args.dealer) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            std::process::exit(1);
        }
    };

    let mut game = ShuffleGuessGame::new(dealer, SmallRng::seed_from_u64(args.seed));
    game.configure(GameConfig {
        n_cards: args.n,
        num_decks: args.n / 52,
        params: Params { m_bits: args.m_bits, encoding: Encoding::Naive },
        ..GameConfig::default()
    });

    let mut obs = match game.init_game() {
        Ok((obs, _)) => obs,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            std::process::exit(1);
        }
    };

    // guess the most-observed type so far; trivial policy, good enough to
    // exercise the harness end to end.
    while !game.is_over() {
        let guess = obs.counts.iter().enumerate().max_by_key(|&(_, count)| count).map(|(type_id, _)| type_id).unwrap_or(0);
        match game.step(guess) {
            Ok((next_obs, _)) => obs = next_obs,
            Err(e) => {
                eprintln!("{} {e}", "error:".red().bold());
                std::process::exit(1);
            }
        }
    }

    let [score] = game.payoffs();
    println!(
        "{} dealer={} n={} seed={} score={}",
        "done:".green().bold(),
        args.dealer,
        args.n,
        args.seed,
        score
    );
}
