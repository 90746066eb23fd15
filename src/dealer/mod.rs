//! the dealer contract: `reset`, `draw`, `remaining`, `peek_next_distribution`,
//! `state_summary`, implemented by four interchangeable algorithms -- §3, §4.
//!
//! each algorithm lives in its own private module behind a plain struct;
//! `Dealer` is a tagged enum over the four, so picking an algorithm costs a
//! branch rather than a heap allocation. none of the four consume
//! randomness while resetting, so `reset` takes no `RandomSource` -- only
//! `draw` does, the same way `rand::seq::SliceRandom::shuffle` takes its
//! rng as a plain argument instead of storing it.

mod adaptive_threshold;
mod bitmap;
mod fisher_yates;
mod perfect;

use crate::random::RandomSource;
use std::collections::BTreeMap;
use std::fmt;

pub use crate::error::Error;

/// bit-packing strategy used by the adaptive-threshold dealer's
/// `theoretical_bits` accounting. does not affect which cards are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// fixed-width index per mini-deck.
    Naive,
    /// Elias-gamma code over each mini-deck's remaining "holes".
    HolesEliasDoc,
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::Naive
    }
}

/// per-dealer tuning knobs. only the adaptive-threshold dealer reads these;
/// the other three ignore them.
#[derive(Debug, Clone, Copy)]
pub struct Params {
    /// memory budget in bits, used to derive the mini-deck count `d`.
    pub m_bits: u32,
    pub encoding: Encoding,
}

impl Default for Params {
    fn default() -> Self {
        Self { m_bits: 64, encoding: Encoding::Naive }
    }
}

/// a snapshot of a dealer's internal bookkeeping, for diagnostics and
/// tests. `extra` carries fields specific to the active algorithm.
#[derive(Debug, Clone)]
pub struct StateSummary {
    pub algorithm: &'static str,
    pub n: usize,
    pub drawn: usize,
    pub remaining: usize,
    pub theoretical_bits: u64,
    pub memory_bytes: usize,
    pub extra: Vec<(&'static str, String)>,
}

/// which algorithm a `Dealer` was built to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bitmap,
    FisherYates,
    Adaptive,
    Perfect,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Bitmap => "bitmap",
            Kind::FisherYates => "fisher_yates",
            Kind::Adaptive => "adaptive",
            Kind::Perfect => "perfect",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

enum Inner {
    Empty,
    Bitmap(bitmap::BitmapState),
    FisherYates(fisher_yates::FisherYatesState),
    Adaptive(adaptive_threshold::AdaptiveState),
    Perfect(perfect::PerfectState),
}

/// a shuffling algorithm paired with the bookkeeping every algorithm shares
/// (`n`, `num_drawn`). built via [`crate::registry::get_dealer`].
pub struct Dealer {
    kind: Kind,
    n: usize,
    num_drawn: usize,
    inner: Inner,
}

impl Dealer {
    pub(crate) fn new(kind: Kind) -> Self {
        Self { kind, n: 0, num_drawn: 0, inner: Inner::Empty }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// prepares the dealer to deal `n` cards. always clears any in-progress
    /// episode, even one that was not fully drawn down. on failure the
    /// dealer is left `Empty` rather than keeping its previous episode
    /// state around, so a subsequent `draw` fails instead of silently
    /// continuing the old episode.
    pub fn reset(&mut self, n: usize, params: Params) -> Result<(), Error> {
        self.inner = Inner::Empty;
        self.n = 0;
        self.num_drawn = 0;
        if n == 0 {
            return Err(Error::InvalidConfig("n must be at least 1".into()));
        }
        log::debug!("resetting {} dealer for n={n}", self.kind);
        let inner = match self.kind {
            Kind::Bitmap => Inner::Bitmap(bitmap::BitmapState::new(n)),
            Kind::FisherYates => Inner::FisherYates(fisher_yates::FisherYatesState::new(n)),
            Kind::Adaptive => Inner::Adaptive(adaptive_threshold::AdaptiveState::new(n, &params)?),
            Kind::Perfect => Inner::Perfect(perfect::PerfectState::new(n)),
        };
        self.inner = inner;
        self.n = n;
        self.num_drawn = 0;
        Ok(())
    }

    /// draws one card, returning its id in `[0, n)`. every id returned
    /// during an episode is distinct.
    pub fn draw(&mut self, rng: &mut dyn RandomSource) -> Result<usize, Error> {
        if matches!(self.inner, Inner::Empty) {
            return Err(Error::InvalidConfig("dealer has not been reset".into()));
        }
        if self.num_drawn >= self.n {
            return Err(Error::Exhausted);
        }
        let id = match &mut self.inner {
            Inner::Bitmap(s) => s.draw(rng),
            Inner::FisherYates(s) => s.draw(rng),
            Inner::Adaptive(s) => s.draw(rng),
            Inner::Perfect(s) => s.draw(rng)?,
            Inner::Empty => unreachable!("checked above"),
        };
        self.num_drawn += 1;
        Ok(id)
    }

    pub fn remaining(&self) -> usize {
        self.n - self.num_drawn
    }

    /// the distribution over the next draw, or `None` once exhausted.
    pub fn peek_next_distribution(&self) -> Option<BTreeMap<usize, f64>> {
        match &self.inner {
            Inner::Bitmap(s) => s.peek(),
            Inner::FisherYates(s) => s.peek(),
            Inner::Adaptive(s) => s.peek(),
            Inner::Perfect(s) => s.peek(),
            Inner::Empty => None,
        }
    }

    /// adaptive-threshold-specific view of [`peek_next_distribution`],
    /// ordered by mini-deck rather than by card id. empty for every other
    /// algorithm.
    pub fn peek_drawable_options(&self) -> Vec<(usize, f64)> {
        match &self.inner {
            Inner::Adaptive(s) => s.peek_drawable_options(),
            _ => Vec::new(),
        }
    }

    pub fn state_summary(&self) -> StateSummary {
        match &self.inner {
            Inner::Bitmap(s) => s.summary(self.n, self.num_drawn),
            Inner::FisherYates(s) => s.summary(self.n, self.num_drawn),
            Inner::Adaptive(s) => s.summary(self.n, self.num_drawn),
            Inner::Perfect(s) => s.summary(self.n, self.num_drawn),
            Inner::Empty => StateSummary {
                algorithm: self.kind.name(),
                n: 0,
                drawn: 0,
                remaining: 0,
                theoretical_bits: 0,
                memory_bytes: 0,
                extra: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::get_dealer;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn draw_before_reset_is_invalid_config() {
        let mut d = get_dealer("bitmap").unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(matches!(d.draw(&mut rng), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn reset_can_be_called_more_than_once() {
        let mut d = get_dealer("fisher_yates").unwrap();
        let mut rng = SmallRng::seed_from_u64(2);
        d.reset(5, Params::default()).unwrap();
        d.draw(&mut rng).unwrap();
        d.draw(&mut rng).unwrap();
        assert_eq!(d.remaining(), 3);
        d.reset(5, Params::default()).unwrap();
        assert_eq!(d.remaining(), 5);
    }

    #[test]
    fn zero_n_is_rejected() {
        let mut d = get_dealer("perfect").unwrap();
        assert!(matches!(d.reset(0, Params::default()), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn a_failed_reset_discards_the_previous_episode() {
        let mut d = get_dealer("fisher_yates").unwrap();
        let mut rng = SmallRng::seed_from_u64(4);
        d.reset(5, Params::default()).unwrap();
        d.draw(&mut rng).unwrap();
        d.draw(&mut rng).unwrap();
        assert_eq!(d.remaining(), 3);

        assert!(matches!(d.reset(0, Params::default()), Err(Error::InvalidConfig(_))));

        // the old n=5 episode must not still be live.
        assert_eq!(d.remaining(), 0);
        assert!(matches!(d.draw(&mut rng), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn draw_past_exhaustion_errors() {
        let mut d = get_dealer("bitmap").unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        d.reset(1, Params::default()).unwrap();
        d.draw(&mut rng).unwrap();
        assert!(matches!(d.draw(&mut rng), Err(Error::Exhausted)));
    }
}
