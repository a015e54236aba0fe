//! Random sources for the niladic `Rand` operation.

use std::cell::RefCell;

/// Source of uniformly distributed values in `[0, 1)`.
pub trait RandomSource: std::fmt::Debug + Send {
    fn next_f64(&self) -> f64;
}

/// Default source backed by `fastrand`.
#[derive(Debug, Clone)]
pub struct FastRandom {
    rng: RefCell<fastrand::Rng>,
}

impl FastRandom {
    pub fn new() -> Self {
        Self {
            rng: RefCell::new(fastrand::Rng::new()),
        }
    }

    /// Reproducible sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: RefCell::new(fastrand::Rng::with_seed(seed)),
        }
    }
}

impl Default for FastRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for FastRandom {
    fn next_f64(&self) -> f64 {
        self.rng.borrow_mut().f64()
    }
}

/// Always yields the same value. Used to pin `Rand` in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn next_f64(&self) -> f64 {
        self.0
    }
}
