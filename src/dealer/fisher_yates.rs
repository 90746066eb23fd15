//! classic swap-delete Fisher-Yates -- §4.3.
//!
//! `O(n)` words of memory, `O(1)` amortized random bits per draw, one
//! uniform draw per card. the baseline every other dealer is measured
//! against.

use crate::dealer::StateSummary;
use crate::random::RandomSource;
use std::collections::BTreeMap;

pub(crate) struct FisherYatesState {
    v: Vec<usize>,
    m: usize,
}

impl FisherYatesState {
    pub(crate) fn new(n: usize) -> Self {
        Self { v: (0..n).collect(), m: n }
    }

    pub(crate) fn draw(&mut self, rng: &mut dyn RandomSource) -> usize {
        let i = rng.uniform_int(0, self.m as i64 - 1) as usize;
        let out = self.v[i];
        self.m -= 1;
        self.v[i] = self.v[self.m];
        out
    }

    pub(crate) fn peek(&self) -> Option<BTreeMap<usize, f64>> {
        if self.m == 0 {
            return None;
        }
        let prob = 1.0 / self.m as f64;
        Some(self.v[..self.m].iter().map(|&id| (id, prob)).collect())
    }

    pub(crate) fn summary(&self, n: usize, drawn: usize) -> StateSummary {
        let bits_per_index = bits_for(n);
        StateSummary {
            algorithm: "fisher_yates",
            n,
            drawn,
            remaining: self.m,
            theoretical_bits: n as u64 * bits_per_index as u64,
            memory_bytes: self.v.len() * std::mem::size_of::<usize>(),
            extra: Vec::new(),
        }
    }
}

/// bits needed to index `[0, n)`, treating `n <= 1` as needing one bit.
fn bits_for(n: usize) -> u32 {
    let m = n.max(2);
    (usize::BITS - (m - 1).leading_zeros()).max(1)
}
