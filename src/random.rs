//! the only entropy a dealer may use.
//!
//! `RandomSource` is deliberately narrow: one operation, an inclusive
//! integer range. Dealers never reach for a process-global RNG, the clock,
//! or anything else -- the caller hands them a source, and the same source
//! state always produces the same draws.

use rand::Rng;

/// supplies uniformly distributed integers in `[lo, hi_inclusive]`.
///
/// implemented for anything that is `rand::RngCore`, so callers can plug in
/// `rand::rngs::SmallRng`, `StdRng`, or any other seedable generator from the
/// wider `rand` ecosystem.
pub trait RandomSource {
    fn uniform_int(&mut self, lo: i64, hi_inclusive: i64) -> i64;
}

impl<R: rand::RngCore + ?Sized> RandomSource for R {
    fn uniform_int(&mut self, lo: i64, hi_inclusive: i64) -> i64 {
        assert!(lo <= hi_inclusive, "empty range [{lo}, {hi_inclusive}]");
        self.gen_range(lo..=hi_inclusive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn stays_in_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let x = rng.uniform_int(3, 9);
            assert!((3..=9).contains(&x));
        }
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let mut a = SmallRng::seed_from_u64(7);
        let mut b = SmallRng::seed_from_u64(7);
        let draws_a: Vec<i64> = (0..50).map(|_| a.uniform_int(0, 1_000)).collect();
        let draws_b: Vec<i64> = (0..50).map(|_| b.uniform_int(0, 1_000)).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn single_value_range() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(rng.uniform_int(5, 5), 5);
    }
}
