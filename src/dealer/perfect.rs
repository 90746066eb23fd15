//! cells / population-intervals construction -- §4.5.
//!
//! the deck is packed into `num_cells` bitmask cells of `w` bits each.
//! cells are kept partitioned by population count (how many set bits they
//! still hold) so that sampling "a uniformly random remaining card" reduces
//! to: pick a population weighted by how many cards it accounts for, pick a
//! cell of that population, pick a set bit inside it. every step is O(1)
//! amortized once the population buckets are in hand.

use crate::dealer::StateSummary;
use crate::random::RandomSource;
use std::collections::BTreeMap;

struct Cell {
    mask: u64,
    base: usize,
}

pub(crate) struct PerfectState {
    w: u32,
    num_cells: usize,
    cells: Vec<Cell>,
    /// `interval_begin[p]..interval_begin[p]+interval_size[p]` is the
    /// (contiguous, swap-maintained) slice of `cells` with population `p`.
    interval_begin: Vec<usize>,
    interval_size: Vec<usize>,
}

/// smallest `w` with `2^w >= max(n, 2)`, floored at 1.
fn bits_for_cell_width(n: usize) -> u32 {
    let m = n.max(2);
    (usize::BITS - (m - 1).leading_zeros()).max(1)
}

/// clear the `r`-th lowest set bit (0-indexed) and return its position.
fn select_and_clear(mask: &mut u64, r: u32) -> u32 {
    let mut m = *mask;
    for _ in 0..r {
        m &= m - 1;
    }
    let pos = m.trailing_zeros();
    *mask &= !(1 << pos);
    pos
}

impl PerfectState {
    pub(crate) fn new(n: usize) -> Self {
        let w = bits_for_cell_width(n);
        let num_cells = n.div_ceil(w as usize);
        let mut cells: Vec<Cell> = (0..num_cells)
            .map(|j| {
                let base = j * w as usize;
                let valid = (n - base).min(w as usize);
                let mask = if valid >= 64 { u64::MAX } else { (1u64 << valid) - 1 };
                Cell { mask, base }
            })
            .collect();
        cells.sort_by_key(|c| c.mask.count_ones());

        let mut interval_begin = vec![0usize; w as usize + 1];
        let mut interval_size = vec![0usize; w as usize + 1];
        for cell in &cells {
            interval_size[cell.mask.count_ones() as usize] += 1;
        }
        let mut offset = 0;
        for p in 0..=w as usize {
            interval_begin[p] = offset;
            offset += interval_size[p];
        }

        Self { w, num_cells, cells, interval_begin, interval_size }
    }

    fn total_remaining(&self) -> u64 {
        (1..=self.w as usize).map(|p| p as u64 * self.interval_size[p] as u64).sum()
    }

    fn demote(&mut self, cell_idx: usize, old_pop: usize) {
        let new_pop = old_pop - 1;
        let first = self.interval_begin[old_pop];
        if cell_idx != first {
            self.cells.swap(cell_idx, first);
        }
        self.interval_begin[old_pop] += 1;
        self.interval_size[old_pop] -= 1;
        self.interval_size[new_pop] += 1;
    }

    pub(crate) fn draw(&mut self, rng: &mut dyn RandomSource) -> Result<usize, crate::dealer::Error> {
        let total = self.total_remaining();
        if total == 0 {
            return Err(crate::dealer::Error::Inconsistent("perfect dealer has no remaining cards to draw".into()));
        }
        let mut r = rng.uniform_int(0, total as i64 - 1) as u64;
        let mut chosen_pop = 0usize;
        for p in 1..=self.w as usize {
            let mass = p as u64 * self.interval_size[p] as u64;
            if r < mass {
                chosen_pop = p;
                break;
            }
            r -= mass;
        }
        let isize = self.interval_size[chosen_pop];
        let slot = rng.uniform_int(0, isize as i64 - 1) as usize;
        let cell_idx = self.interval_begin[chosen_pop] + slot;
        let bit_rank = rng.uniform_int(0, chosen_pop as i64 - 1) as u32;
        let pos = select_and_clear(&mut self.cells[cell_idx].mask, bit_rank);
        let id = self.cells[cell_idx].base + pos as usize;
        self.demote(cell_idx, chosen_pop);
        Ok(id)
    }

    pub(crate) fn peek(&self) -> Option<BTreeMap<usize, f64>> {
        let total = self.total_remaining();
        if total == 0 {
            return None;
        }
        let prob = 1.0 / total as f64;
        let mut dist = BTreeMap::new();
        for cell in &self.cells {
            let mut mask = cell.mask;
            while mask != 0 {
                let pos = mask.trailing_zeros();
                dist.insert(cell.base + pos as usize, prob);
                mask &= mask - 1;
            }
        }
        Some(dist)
    }

    pub(crate) fn summary(&self, n: usize, drawn: usize) -> StateSummary {
        StateSummary {
            algorithm: "perfect",
            n,
            drawn,
            remaining: n - drawn,
            theoretical_bits: self.num_cells as u64 * self.w as u64,
            memory_bytes: self.cells.len() * (std::mem::size_of::<u64>() + std::mem::size_of::<usize>())
                + (self.interval_begin.len() + self.interval_size.len()) * std::mem::size_of::<usize>(),
            extra: vec![("w", self.w.to_string()), ("num_cells", self.num_cells.to_string())],
        }
    }
}
