//! The per-trial random source.
//!
//! [`RandomSource`] names the handful of draws the generator and the Get
//! sequence make. Every [`rand::Rng`] implements it, so a trial can own an
//! OS-seeded [`StdRng`] while tests substitute a seeded one and replay the
//! exact draw sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draw primitives used by the workload engine.
pub trait RandomSource {
    /// Uniform `i32` in `[0, bound)`. Returns 0 when `bound <= 0`.
    fn nonneg_i32_below(&mut self, bound: i32) -> i32;

    /// Uniform index in `[0, bound)`. Returns 0 when `bound == 0`.
    fn index_below(&mut self, bound: usize) -> usize;

    /// Uniform `i64` over the full range.
    fn next_i64(&mut self) -> i64;

    /// Fair coin.
    fn next_bool(&mut self) -> bool;

    /// Uniform `f32` in `[0, 1)`.
    fn unit_f32(&mut self) -> f32;

    /// Uniform `f64` in `[0, 1)`.
    fn unit_f64(&mut self) -> f64;

    /// Overwrite `buf` with uniform bytes.
    fn fill_random_bytes(&mut self, buf: &mut [u8]);

    /// Uniform UTF-16 code unit in `[0, bound)`. Returns 0 when `bound == 0`.
    fn code_unit_below(&mut self, bound: u16) -> u16;
}

impl<R: Rng> RandomSource for R {
    #[inline]
    fn nonneg_i32_below(&mut self, bound: i32) -> i32 {
        if bound <= 0 {
            0
        } else {
            self.random_range(0..bound)
        }
    }

    #[inline]
    fn index_below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            0
        } else {
            self.random_range(0..bound)
        }
    }

    #[inline]
    fn next_i64(&mut self) -> i64 {
        self.random()
    }

    #[inline]
    fn next_bool(&mut self) -> bool {
        self.random()
    }

    #[inline]
    fn unit_f32(&mut self) -> f32 {
        self.random()
    }

    #[inline]
    fn unit_f64(&mut self) -> f64 {
        self.random()
    }

    #[inline]
    fn fill_random_bytes(&mut self, buf: &mut [u8]) {
        self.fill(buf);
    }

    #[inline]
    fn code_unit_below(&mut self, bound: u16) -> u16 {
        if bound == 0 {
            0
        } else {
            self.random_range(0..bound)
        }
    }
}

/// Fresh trial source seeded from OS entropy. No seed is pinned.
#[must_use]
pub fn trial_rng() -> StdRng {
    StdRng::from_os_rng()
}

/// Reproducible source for tests and replayable runs.
#[must_use]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_bounds_are_total() {
        let mut rng = seeded_rng(1);
        assert_eq!(rng.nonneg_i32_below(0), 0);
        assert_eq!(rng.nonneg_i32_below(-5), 0);
        assert_eq!(rng.index_below(0), 0);
        assert_eq!(rng.code_unit_below(0), 0);
    }

    #[test]
    fn test_draws_stay_in_range() {
        let mut rng = seeded_rng(7);
        for _ in 0..10_000 {
            let v = rng.nonneg_i32_below(i32::MAX);
            assert!((0..i32::MAX).contains(&v));

            let idx = rng.index_below(10);
            assert!(idx < 10);

            let u = rng.code_unit_below(u16::MAX);
            assert!(u < u16::MAX);

            let f = rng.unit_f32();
            assert!((0.0..1.0).contains(&f));

            let d = rng.unit_f64();
            assert!((0.0..1.0).contains(&d));
        }
    }

    #[test]
    fn test_seeded_sources_replay() {
        let mut a = seeded_rng(99);
        let mut b = seeded_rng(99);
        for _ in 0..100 {
            assert_eq!(a.next_i64(), b.next_i64());
            assert_eq!(a.index_below(1000), b.index_below(1000));
        }
    }

    #[test]
    fn test_fill_random_bytes_fills() {
        let mut rng = seeded_rng(3);
        let mut buf = [0u8; 256];
        rng.fill_random_bytes(&mut buf);
        // 256 zero bytes from a uniform source is not a realistic outcome.
        assert!(buf.iter().any(|&b| b != 0));
    }
}
