//! `rand` adapter for the confidence source.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::ports::ConfidenceSource;

/// Confidence source backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngConfidence<R: RngCore> {
    rng: R,
}

impl<R: RngCore> RngConfidence<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngConfidence<ChaCha20Rng> {
    /// Seed from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(ChaCha20Rng::from_entropy())
    }

    /// Reproducible sequence for demos and tests.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> ConfidenceSource for RngConfidence<R> {
    fn sample_unit(&mut self) -> f64 {
        // Standard distribution for f64 is uniform over [0, 1).
        self.rng.gen::<f64>()
    }
}

/// Always returns the same sample.
#[derive(Debug, Clone, Copy)]
pub struct FixedConfidence(pub f64);

impl ConfidenceSource for FixedConfidence {
    fn sample_unit(&mut self) -> f64 {
        self.0
    }
}
