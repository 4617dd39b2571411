//! Random draws used by the generators.
//!
//! Nothing in the crate touches a process-wide generator: callers hand a
//! source in, so a seeded [`StdRng`] reproduces a run exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Bounded draws the generators need.
pub trait RandomSource {
    /// Uniform float in `[low, high)`. Returns `low` when the range is empty.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Uniform integer in `[low, high]`.
    fn int_inclusive(&mut self, low: i64, high: i64) -> i64;

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T
    where
        Self: Sized,
    {
        &items[self.index(items.len())]
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.gen_range(low..high)
    }

    fn int_inclusive(&mut self, low: i64, high: i64) -> i64 {
        if low >= high {
            return low;
        }
        self.gen_range(low..=high)
    }

    fn index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Seeded generator when `seed` is given, entropy-seeded otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_in_bounds() {
        let mut rng = make_rng(Some(7));
        for _ in 0..1000 {
            let v = rng.uniform(-5.0, 5.0);
            assert!((-5.0..5.0).contains(&v));
            let n = rng.int_inclusive(15, 45);
            assert!((15..=45).contains(&n));
            assert!(rng.index(6) < 6);
        }
    }

    #[test]
    fn empty_ranges_collapse_to_low() {
        let mut rng = make_rng(Some(1));
        assert_eq!(rng.uniform(3.0, 3.0), 3.0);
        assert_eq!(rng.int_inclusive(9, 2), 9);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = make_rng(Some(42));
        let mut b = make_rng(Some(42));
        let xs: Vec<f64> = (0..16).map(|_| a.uniform(0.0, 1.0)).collect();
        let ys: Vec<f64> = (0..16).map(|_| b.uniform(0.0, 1.0)).collect();
        assert_eq!(xs, ys);
    }
}
