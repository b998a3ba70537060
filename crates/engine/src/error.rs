//! Engine fault types.
//!
//! Simulated transaction failures are ordinary business outcomes and
//! never surface through [`EngineError`]; only unexpected internal
//! faults and I/O problems do.

use thiserror::Error;

/// Faults internal to the engine or its report emission.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Sampler(#[from] crate::sampler::SamplerError),

    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
