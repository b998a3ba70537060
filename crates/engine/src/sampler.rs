//! Reusable discrete weighted distribution.
//!
//! Formalizes cumulative-weight sampling behind a small type so the
//! workload's role tables and any other weighted choice share one
//! implementation. The RNG is injected, so tests can drive selection
//! with a fixed seed.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Tolerance when validating that weights sum to 1.0.
const WEIGHT_EPSILON: f64 = 1e-6;

/// Errors building a [`WeightedSampler`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SamplerError {
    #[error("distribution has no outcomes")]
    Empty,

    #[error("weight for bucket {index} must be positive, got {weight}")]
    NonPositiveWeight { index: usize, weight: f64 },

    #[error("weights sum to {sum}, expected 1.0")]
    BadSum { sum: f64 },
}

/// Samples outcomes from a fixed weighted distribution.
///
/// Selection walks the cumulative weights, so results do not depend on
/// bucket order beyond the weights themselves; the final bucket absorbs
/// floating-point slack.
#[derive(Clone, Debug)]
pub struct WeightedSampler<T> {
    outcomes: Vec<(T, f64)>,
}

impl<T> WeightedSampler<T> {
    /// Build a sampler from `(outcome, weight)` pairs.
    ///
    /// Weights must be positive and sum to 1.0 within a small epsilon.
    pub fn new(outcomes: Vec<(T, f64)>) -> Result<Self, SamplerError> {
        if outcomes.is_empty() {
            return Err(SamplerError::Empty);
        }
        for (index, (_, weight)) in outcomes.iter().enumerate() {
            if *weight <= 0.0 || !weight.is_finite() {
                return Err(SamplerError::NonPositiveWeight {
                    index,
                    weight: *weight,
                });
            }
        }
        let sum: f64 = outcomes.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > WEIGHT_EPSILON {
            return Err(SamplerError::BadSum { sum });
        }
        Ok(Self { outcomes })
    }

    /// Draw one outcome.
    pub fn sample(&self, rng: &mut ChaCha8Rng) -> &T {
        let draw: f64 = rng.gen();
        let mut cumulative = 0.0;
        for (outcome, weight) in &self.outcomes {
            cumulative += weight;
            if draw <= cumulative {
                return outcome;
            }
        }
        // Cumulative sum fell short of the draw by floating-point slack.
        &self.outcomes.last().expect("validated non-empty").0
    }
}
