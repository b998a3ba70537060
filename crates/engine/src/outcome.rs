//! Latency, failure and gas parameterization per transaction kind.
//!
//! The model is pure parameterization with the RNG injected, so tests
//! can swap in a scripted model and force specific outcomes without
//! touching the rest of the engine.

use fundbench_types::TransactionKind;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

/// One drawn outcome for a transaction about to be submitted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outcome {
    /// Simulated confirmation delay. Non-negative and clamped to the
    /// profile ceiling.
    pub delay: Duration,
    /// Probability that this submission fails.
    pub failure_probability: f64,
    /// Gas budget requested for the submission.
    pub gas_limit: u64,
}

/// Base delay range and failure odds for one transaction kind.
#[derive(Clone, Copy, Debug)]
pub struct KindProfile {
    /// Half-open base delay range in milliseconds.
    pub base_delay_ms: (u64, u64),
    pub failure_probability: f64,
}

/// Per-kind profiles plus the terms shared by every kind.
#[derive(Clone, Debug)]
pub struct LatencyProfiles {
    fund_release: KindProfile,
    project_registration: KindProfile,
    material_purchase: KindProfile,
    progress_update: KindProfile,
    contractor_verification: KindProfile,
    /// Additive network latency, half-open range in milliseconds.
    pub network_jitter_ms: (u64, u64),
    /// Half-open gas budget range.
    pub gas_range: (u64, u64),
    /// Upper bound on any drawn delay, keeping the simulation tractable.
    pub delay_ceiling: Duration,
}

impl LatencyProfiles {
    /// Profiles emulating Sepolia-like confirmation behavior.
    ///
    /// Multi-step contract operations fail materially more often than a
    /// plain verification (0.08 vs 0.05, ~1.6x).
    pub fn sepolia() -> Self {
        Self {
            fund_release: KindProfile {
                base_delay_ms: (8_000, 13_000),
                failure_probability: 0.05,
            },
            project_registration: KindProfile {
                base_delay_ms: (10_000, 14_000),
                failure_probability: 0.08,
            },
            material_purchase: KindProfile {
                base_delay_ms: (7_000, 10_000),
                failure_probability: 0.05,
            },
            progress_update: KindProfile {
                base_delay_ms: (6_000, 8_000),
                failure_probability: 0.05,
            },
            contractor_verification: KindProfile {
                base_delay_ms: (5_000, 7_000),
                failure_probability: 0.05,
            },
            network_jitter_ms: (0, 2_000),
            gas_range: (21_000, 171_000),
            delay_ceiling: Duration::from_millis(15_000),
        }
    }

    /// Override the delay ceiling.
    pub fn with_delay_ceiling(mut self, ceiling: Duration) -> Self {
        self.delay_ceiling = ceiling;
        self
    }

    /// Profile for one kind.
    pub fn profile(&self, kind: TransactionKind) -> KindProfile {
        match kind {
            TransactionKind::FundRelease => self.fund_release,
            TransactionKind::ProjectRegistration => self.project_registration,
            TransactionKind::MaterialPurchase => self.material_purchase,
            TransactionKind::ProgressUpdate => self.progress_update,
            TransactionKind::ContractorVerification => self.contractor_verification,
        }
    }
}

/// Draws latency, failure odds and a gas budget for a transaction kind.
///
/// Implementations must have no side effects beyond consuming the RNG.
pub trait OutcomeModel: Send + Sync {
    fn draw(&self, kind: TransactionKind, rng: &mut ChaCha8Rng) -> Outcome;
}

/// Default model: per-kind base delay plus shared network jitter,
/// clamped to the profile ceiling.
#[derive(Clone, Debug)]
pub struct RandomOutcomeModel {
    profiles: LatencyProfiles,
}

impl RandomOutcomeModel {
    pub fn new(profiles: LatencyProfiles) -> Self {
        Self { profiles }
    }
}

impl OutcomeModel for RandomOutcomeModel {
    fn draw(&self, kind: TransactionKind, rng: &mut ChaCha8Rng) -> Outcome {
        let profile = self.profiles.profile(kind);
        let base = draw_range(rng, profile.base_delay_ms);
        let jitter = draw_range(rng, self.profiles.network_jitter_ms);
        let ceiling_ms = self.profiles.delay_ceiling.as_millis() as u64;
        Outcome {
            delay: Duration::from_millis((base + jitter).min(ceiling_ms)),
            failure_probability: profile.failure_probability,
            gas_limit: draw_range(rng, self.profiles.gas_range),
        }
    }
}

/// Scripted model for tests: one fixed outcome for every kind.
#[derive(Clone, Copy, Debug)]
pub struct FixedOutcomeModel {
    pub delay: Duration,
    pub failure_probability: f64,
    pub gas_limit: u64,
}

impl OutcomeModel for FixedOutcomeModel {
    fn draw(&self, _kind: TransactionKind, _rng: &mut ChaCha8Rng) -> Outcome {
        Outcome {
            delay: self.delay,
            failure_probability: self.failure_probability,
            gas_limit: self.gas_limit,
        }
    }
}

/// Draw from a half-open range, returning the lower bound when the
/// range is empty.
pub(crate) fn draw_range(rng: &mut ChaCha8Rng, range: (u64, u64)) -> u64 {
    if range.1 <= range.0 {
        range.0
    } else {
        rng.gen_range(range.0..range.1)
    }
}
