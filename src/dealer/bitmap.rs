//! rejection sampling on a packed availability bitmap -- §4.2.
//!
//! expected trials per draw is `n / remaining`, so the very last draw costs
//! `O(n)` trials in expectation. fine for `n` up to roughly 128; the other
//! three dealers exist because this one degrades badly beyond that.

use crate::dealer::StateSummary;
use crate::random::RandomSource;
use std::collections::BTreeMap;

const WORD_BITS: usize = u64::BITS as usize;

pub(crate) struct BitmapState {
    words: Vec<u64>,
    n: usize,
}

impl BitmapState {
    pub(crate) fn new(n: usize) -> Self {
        let num_words = n.div_ceil(WORD_BITS);
        let mut words = vec![0u64; num_words];
        for i in 0..n {
            words[i / WORD_BITS] |= 1 << (i % WORD_BITS);
        }
        Self { words, n }
    }

    fn get(&self, i: usize) -> bool {
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    fn clear(&mut self, i: usize) {
        self.words[i / WORD_BITS] &= !(1 << (i % WORD_BITS));
    }

    fn popcount(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    pub(crate) fn draw(&mut self, rng: &mut dyn RandomSource) -> usize {
        loop {
            let c = rng.uniform_int(0, self.n as i64 - 1) as usize;
            if self.get(c) {
                self.clear(c);
                return c;
            }
        }
    }

    pub(crate) fn peek(&self) -> Option<BTreeMap<usize, f64>> {
        let remaining = self.popcount();
        if remaining == 0 {
            return None;
        }
        let prob = 1.0 / remaining as f64;
        Some((0..self.n).filter(|&i| self.get(i)).map(|i| (i, prob)).collect())
    }

    pub(crate) fn summary(&self, n: usize, drawn: usize) -> StateSummary {
        StateSummary {
            algorithm: "bitmap",
            n,
            drawn,
            remaining: n - drawn,
            theoretical_bits: n as u64,
            memory_bytes: self.words.len() * std::mem::size_of::<u64>(),
            extra: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn draws_a_permutation() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut s = BitmapState::new(10);
        let mut seen: Vec<usize> = (0..10).map(|_| s.draw(&mut rng)).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn peek_shrinks_and_sums_to_one() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut s = BitmapState::new(5);
        for expected_remaining in (1..=5).rev() {
            let dist = s.peek().unwrap();
            assert_eq!(dist.len(), expected_remaining);
            let total: f64 = dist.values().sum();
            assert!((total - 1.0).abs() < 1e-9);
            s.draw(&mut rng);
        }
        assert!(s.peek().is_none());
    }

    #[test]
    fn packed_words_cover_n_bits() {
        let s = BitmapState::new(130);
        assert_eq!(s.words.len(), 3);
    }

    #[test]
    fn concrete_scenario_n2_first_draw_is_unbiased_over_10_000_seeds() {
        let mut zeros = 0u32;
        for seed in 0..10_000u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut s = BitmapState::new(2);
            if s.draw(&mut rng) == 0 {
                zeros += 1;
            }
        }
        assert!((4_850..=5_150).contains(&zeros), "first-draw-is-0 count {zeros} out of expected 5000 +/- 150");
    }
}
