//! Four dealer algorithms for shuffling in sublinear memory, plus a
//! single-player evaluation game that scores how predictable a dealer is.
//!
//! The algorithms come from the literature on low-memory shuffling: a
//! rejection sampler over a bitmap, the classic Fisher-Yates swap-delete, a
//! two-phase adaptive-threshold mini-deck scheme, and a cells /
//! population-intervals construction with O(1) amortized random bits per
//! draw.

pub mod cards;
pub mod dealer;
pub mod error;
pub mod game;
pub mod random;
pub mod registry;

pub use dealer::{Dealer, Encoding, Kind, Params};
pub use error::Error;
pub use game::{ActionMode, GameConfig, Observation, ShuffleGuessGame};
pub use random::RandomSource;
pub use registry::get_dealer;

/// probability mass, as returned by `peek_next_distribution`.
pub type Probability = f64;

/// initialize the terminal logger used by the demo binary.
#[cfg(feature = "cli")]
pub fn init_logging() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}
