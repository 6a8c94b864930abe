//! Variant Chooser.
//!
//! Phrasing variants are picked by uncommitted random selection to reduce felt
//! repetitiveness across independent sessions. The choice is not
//! security-sensitive, but it is the pipeline's only source of
//! non-determinism, so it lives behind this seam and tests substitute a fixed
//! chooser.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks an index into a pool of phrasing variants.
pub trait VariantChooser: Send {
    /// Return an index in `0..pool_len`. `pool_len` is always at least 1.
    fn choose(&mut self, pool_len: usize) -> usize;
}

/// Default chooser backed by a standard RNG.
pub struct RandomChooser {
    rng: StdRng,
}

impl RandomChooser {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded variant for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomChooser {
    fn default() -> Self {
        Self::new()
    }
}

impl VariantChooser for RandomChooser {
    fn choose(&mut self, pool_len: usize) -> usize {
        if pool_len <= 1 {
            return 0;
        }
        self.rng.gen_range(0..pool_len)
    }
}

/// Test chooser pinned to one index (clamped to the pool).
pub struct FixedChooser(pub usize);

impl VariantChooser for FixedChooser {
    fn choose(&mut self, pool_len: usize) -> usize {
        if pool_len == 0 {
            return 0;
        }
        self.0.min(pool_len - 1)
    }
}
