//! two-phase adaptive-threshold mini-deck scheme -- §4.4.
//!
//! the deck is split into `d` mini-decks of near-equal size. an adaptive
//! phase draws by rejection against a threshold that tightens over time;
//! once the threshold would admit every remaining card anyway, the dealer
//! switches to a swap-delete tail over whatever is left. `d` is capped by
//! `m_bits`, which is where the "sublinear memory" budget enters.

use crate::dealer::{Encoding, Error, Params, StateSummary};
use crate::random::RandomSource;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Adaptive,
    Final,
}

pub(crate) struct AdaptiveState {
    d: usize,
    sizes: Vec<usize>,
    starts: Vec<usize>,
    ell: Vec<usize>,
    t: usize,
    n_adaptive: usize,
    phase: Phase,
    tail: Vec<usize>,
    tail_len: usize,
    m_bits: u32,
    encoding: Encoding,
}

impl AdaptiveState {
    pub(crate) fn new(n: usize, params: &Params) -> Result<Self, Error> {
        let d = 1.max((params.m_bits as usize / 8).min(n / 2).max(1));
        if d > n {
            return Err(Error::InvalidConfig(format!(
                "adaptive threshold dealer cannot partition n={n} into d={d} mini-decks"
            )));
        }
        let base = n / d;
        let extra = n % d;
        let mut sizes = Vec::with_capacity(d);
        let mut starts = Vec::with_capacity(d);
        let mut offset = 0;
        for i in 0..d {
            let size = if i < extra { base + 1 } else { base };
            starts.push(offset);
            sizes.push(size);
            offset += size;
        }
        Ok(Self {
            d,
            sizes,
            starts,
            ell: vec![0; d],
            t: 0,
            n_adaptive: n.saturating_sub(2 * d),
            phase: Phase::Adaptive,
            tail: Vec::new(),
            tail_len: 0,
            m_bits: params.m_bits,
            encoding: params.encoding,
        })
    }

    /// threshold used for adaptive draw number `t_next` (1-based). both
    /// `draw` and `peek` call this with the same argument so that the card
    /// `peek` predicts is always the card `draw` actually returns.
    fn threshold_for(t_next: usize, d: usize) -> usize {
        t_next.div_ceil(d) + 1
    }

    /// threshold as reported in diagnostics: the one that produced the
    /// *last* draw, or `1` before any adaptive draw has happened.
    fn diagnostic_threshold(&self) -> usize {
        if self.t == 0 {
            1
        } else {
            Self::threshold_for(self.t, self.d)
        }
    }

    fn drawable_mini_decks(&self, threshold: usize) -> Vec<usize> {
        (0..self.d)
            .filter(|&i| self.ell[i] < threshold && self.ell[i] < self.sizes[i])
            .collect()
    }

    fn top_card(&self, i: usize) -> usize {
        self.starts[i] + self.ell[i]
    }

    /// cards left once every mini-deck's remaining cards are pooled for the
    /// final swap-delete phase, in ascending id order.
    fn build_tail(&self) -> Vec<usize> {
        let mut tail = Vec::new();
        for i in 0..self.d {
            for offset in self.ell[i]..self.sizes[i] {
                tail.push(self.starts[i] + offset);
            }
        }
        tail
    }

    fn enter_final_phase(&mut self) {
        self.tail = self.build_tail();
        self.tail_len = self.tail.len();
        self.phase = Phase::Final;
    }

    fn draw_final(&mut self, rng: &mut dyn RandomSource) -> usize {
        let i = rng.uniform_int(0, self.tail_len as i64 - 1) as usize;
        let out = self.tail[i];
        self.tail_len -= 1;
        self.tail[i] = self.tail[self.tail_len];
        out
    }

    pub(crate) fn draw(&mut self, rng: &mut dyn RandomSource) -> usize {
        if self.phase == Phase::Final {
            return self.draw_final(rng);
        }
        let t_next = self.t + 1;
        if t_next > self.n_adaptive {
            self.enter_final_phase();
            return self.draw_final(rng);
        }
        let threshold = Self::threshold_for(t_next, self.d);
        loop {
            let i = rng.uniform_int(0, self.d as i64 - 1) as usize;
            if self.ell[i] < threshold && self.ell[i] < self.sizes[i] {
                let card = self.top_card(i);
                self.ell[i] += 1;
                self.t = t_next;
                return card;
            }
        }
    }

    pub(crate) fn peek(&self) -> Option<BTreeMap<usize, f64>> {
        if self.phase == Phase::Final {
            if self.tail_len == 0 {
                return None;
            }
            let prob = 1.0 / self.tail_len as f64;
            return Some(self.tail[..self.tail_len].iter().map(|&id| (id, prob)).collect());
        }
        let t_next = self.t + 1;
        if t_next > self.n_adaptive {
            let tail = self.build_tail();
            if tail.is_empty() {
                return None;
            }
            let prob = 1.0 / tail.len() as f64;
            return Some(tail.into_iter().map(|id| (id, prob)).collect());
        }
        let threshold = Self::threshold_for(t_next, self.d);
        let drawable = self.drawable_mini_decks(threshold);
        if drawable.is_empty() {
            return None;
        }
        let prob = 1.0 / drawable.len() as f64;
        Some(drawable.into_iter().map(|i| (self.top_card(i), prob)).collect())
    }

    /// the same support as `peek`, but ordered by mini-deck index rather
    /// than by card id. only meaningful while still in the adaptive phase.
    pub(crate) fn peek_drawable_options(&self) -> Vec<(usize, f64)> {
        if self.phase == Phase::Final {
            if self.tail_len == 0 {
                return Vec::new();
            }
            let prob = 1.0 / self.tail_len as f64;
            return self.tail[..self.tail_len].iter().map(|&id| (id, prob)).collect();
        }
        let t_next = self.t + 1;
        if t_next > self.n_adaptive {
            let tail = self.build_tail();
            if tail.is_empty() {
                return Vec::new();
            }
            let prob = 1.0 / tail.len() as f64;
            return tail.into_iter().map(|id| (id, prob)).collect();
        }
        let threshold = Self::threshold_for(t_next, self.d);
        let drawable = self.drawable_mini_decks(threshold);
        if drawable.is_empty() {
            return Vec::new();
        }
        let prob = 1.0 / drawable.len() as f64;
        drawable.into_iter().map(|i| (self.top_card(i), prob)).collect()
    }

    pub(crate) fn summary(&self, n: usize, drawn: usize) -> StateSummary {
        let threshold = self.diagnostic_threshold();
        let theoretical_bits = match self.encoding {
            Encoding::Naive => self.d as u64 * bits_for(n) as u64,
            Encoding::HolesEliasDoc => self
                .ell
                .iter()
                .zip(&self.sizes)
                .filter(|(&ell, &size)| ell < size)
                .map(|(&ell, _)| elias_gamma_bits(threshold.saturating_sub(ell) as u64))
                .sum::<u64>()
                + self.d as u64 * 2,
        };
        let memory_bytes =
            (self.ell.len() + self.sizes.len() + self.starts.len() + self.tail.len()) * std::mem::size_of::<usize>();
        StateSummary {
            algorithm: "adaptive_threshold",
            n,
            drawn,
            remaining: n - drawn,
            theoretical_bits,
            memory_bytes,
            extra: vec![
                ("d", self.d.to_string()),
                ("t", self.t.to_string()),
                ("threshold", threshold.to_string()),
                ("phase", if self.phase == Phase::Final { "final".into() } else { "adaptive".into() }),
                ("m_bits", self.m_bits.to_string()),
            ],
        }
    }
}

fn bits_for(n: usize) -> u32 {
    let m = n.max(2);
    (usize::BITS - (m - 1).leading_zeros()).max(1)
}

/// Elias-gamma code length for a positive integer `x + 1`.
fn elias_gamma_bits(x: u64) -> u64 {
    let val = x + 1;
    let floor_log2 = u64::BITS - 1 - val.leading_zeros();
    2 * floor_log2 as u64 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn params(m_bits: u32) -> Params {
        Params { m_bits, encoding: Encoding::Naive }
    }

    #[test]
    fn partitions_into_d_mini_decks_covering_n() {
        let s = AdaptiveState::new(104, &params(64)).unwrap();
        assert_eq!(s.sizes.iter().sum::<usize>(), 104);
        assert_eq!(s.starts[0], 0);
        assert_eq!(s.starts[1], s.sizes[0]);
    }

    #[test]
    fn draws_a_permutation() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut s = AdaptiveState::new(40, &params(8)).unwrap();
        let mut seen: Vec<usize> = (0..40).map(|_| s.draw(&mut rng)).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn peek_always_contains_the_next_drawn_card() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut s = AdaptiveState::new(30, &params(8)).unwrap();
        for _ in 0..30 {
            let dist = s.peek().unwrap();
            let total: f64 = dist.values().sum();
            assert!((total - 1.0).abs() < 1e-9);
            let drawn = s.draw(&mut rng);
            assert!(dist.contains_key(&drawn), "drawn {drawn} missing from peek support {dist:?}");
        }
        assert!(s.peek().is_none());
    }

    #[test]
    fn falls_back_to_final_swap_delete_once_adaptive_budget_is_spent() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut s = AdaptiveState::new(6, &params(16)).unwrap();
        // d = min(16/8, 3).max(1) = 2, n_adaptive = 6 - 4 = 2
        assert_eq!(s.d, 2);
        assert_eq!(s.n_adaptive, 2);
        s.draw(&mut rng);
        s.draw(&mut rng);
        assert_eq!(s.phase, Phase::Adaptive);
        s.draw(&mut rng);
        assert_eq!(s.phase, Phase::Final);
    }

    #[test]
    fn concrete_scenario_n104_m_bits64_partitions_into_8_mini_decks_of_13() {
        let s = AdaptiveState::new(104, &params(64)).unwrap();
        assert_eq!(s.d, 8);
        assert_eq!(s.sizes, vec![13; 8]);
        assert_eq!(s.starts, vec![0, 13, 26, 39, 52, 65, 78, 91]);

        let tops: Vec<usize> = s.starts.clone();
        for seed in 0..200u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut s = AdaptiveState::new(104, &params(64)).unwrap();
            let first = s.draw(&mut rng);
            assert!(tops.contains(&first), "first draw {first} is not a mini-deck top for seed {seed}");
        }
    }
}
