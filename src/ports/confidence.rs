//! Confidence port: Trait for the randomness behind the confidence value.
//!
//! Confidence is cosmetic and the only non-deterministic part of an
//! assessment. Injecting the source keeps evaluation reproducible in tests.

/// Source of uniform samples used to derive the confidence percentage.
pub trait ConfidenceSource {
    /// Draw the next sample.
    ///
    /// Implementations should return a value in [0, 1). The evaluator clamps
    /// anything outside that interval.
    fn sample_unit(&mut self) -> f64;
}

impl<T: ConfidenceSource + ?Sized> ConfidenceSource for &mut T {
    fn sample_unit(&mut self) -> f64 {
        (**self).sample_unit()
    }
}

impl<T: ConfidenceSource + ?Sized> ConfidenceSource for Box<T> {
    fn sample_unit(&mut self) -> f64 {
        (**self).sample_unit()
    }
}
