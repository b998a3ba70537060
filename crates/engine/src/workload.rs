//! Per-user workload driver.
//!
//! Each synthetic user submits a configured number of transactions,
//! picking every kind from its role's weighted table with a randomized
//! pause between submissions. A fault inside the loop is contained: it
//! is logged against the user and the summary is still returned with
//! whatever transactions completed.

use crate::metrics::MetricsAggregator;
use crate::outcome::{draw_range, OutcomeModel};
use crate::sampler::WeightedSampler;
use crate::simulate::simulate_transaction;
use chrono::Utc;
use fundbench_types::{ErrorEntry, Role, TransactionKind, UserSummary, Wallet};
use futures::FutureExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

use TransactionKind::*;

/// Global transaction mix; auditors use it unchanged.
const GLOBAL_WEIGHTS: [(TransactionKind, f64); 5] = [
    (FundRelease, 0.30),
    (ProjectRegistration, 0.20),
    (MaterialPurchase, 0.20),
    (ProgressUpdate, 0.20),
    (ContractorVerification, 0.10),
];

/// Officials mostly release funds and verify contractors.
const OFFICIAL_WEIGHTS: [(TransactionKind, f64); 5] = [
    (FundRelease, 0.60),
    (ContractorVerification, 0.20),
    (ProgressUpdate, 0.08),
    (ProjectRegistration, 0.06),
    (MaterialPurchase, 0.06),
];

/// Contractors register projects and report progress.
const CONTRACTOR_WEIGHTS: [(TransactionKind, f64); 5] = [
    (ProjectRegistration, 0.40),
    (ProgressUpdate, 0.25),
    (MaterialPurchase, 0.20),
    (FundRelease, 0.10),
    (ContractorVerification, 0.05),
];

/// One explicit weighted table per role.
#[derive(Clone, Debug)]
pub struct RoleSamplers {
    official: WeightedSampler<TransactionKind>,
    contractor: WeightedSampler<TransactionKind>,
    auditor: WeightedSampler<TransactionKind>,
}

impl RoleSamplers {
    /// The standard role tables.
    pub fn standard() -> Self {
        let build = |weights: [(TransactionKind, f64); 5]| {
            WeightedSampler::new(weights.to_vec()).expect("role weights sum to 1.0")
        };
        Self {
            official: build(OFFICIAL_WEIGHTS),
            contractor: build(CONTRACTOR_WEIGHTS),
            auditor: build(GLOBAL_WEIGHTS),
        }
    }

    pub fn for_role(&self, role: Role) -> &WeightedSampler<TransactionKind> {
        match role {
            Role::Official => &self.official,
            Role::Contractor => &self.contractor,
            Role::Auditor => &self.auditor,
        }
    }
}

impl Default for RoleSamplers {
    fn default() -> Self {
        Self::standard()
    }
}

/// Everything a user task needs, shared across all users.
pub struct WorkloadContext {
    pub model: Arc<dyn OutcomeModel>,
    pub metrics: MetricsAggregator,
    pub samplers: RoleSamplers,
    pub transactions_per_user: u32,
    /// Half-open inter-transaction pause range in milliseconds.
    pub pause_ms: (u64, u64),
}

/// Drive one synthetic user through its transaction sequence.
///
/// Transactions are strictly sequential within a user: submission i+1
/// never starts before i reached its terminal state.
pub async fn run_user(user_id: u64, ctx: &WorkloadContext, seed: u64) -> UserSummary {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let role = Role::for_user(user_id);
    let wallet = Wallet::generate(user_id, &mut rng);
    let sampler = ctx.samplers.for_role(role);

    info!(user_id, role = %role, wallet = %wallet.address, "user started");

    let started = Instant::now();
    let start_time = Utc::now();
    let mut transactions = Vec::with_capacity(ctx.transactions_per_user as usize);
    let mut fault = None;

    for tx_index in 0..ctx.transactions_per_user {
        let kind = *sampler.sample(&mut rng);
        let simulated = AssertUnwindSafe(simulate_transaction(
            &wallet,
            kind,
            ctx.model.as_ref(),
            &ctx.metrics,
            &mut rng,
        ))
        .catch_unwind()
        .await;

        match simulated {
            Ok(record) => transactions.push(record),
            Err(payload) => {
                let message = panic_message(payload);
                error!(user_id, tx_index, message = %message, "user loop fault, keeping partial results");
                ctx.metrics
                    .record_error(ErrorEntry::for_user(user_id, message.clone()));
                fault = Some(message);
                break;
            }
        }

        // Pacing between submissions.
        let pause = draw_range(&mut rng, ctx.pause_ms);
        tokio::time::sleep(Duration::from_millis(pause)).await;
    }

    let elapsed_ms = started.elapsed().as_secs_f64() * 1_000.0;
    info!(
        user_id,
        transactions = transactions.len(),
        elapsed_ms,
        "user finished"
    );

    UserSummary {
        user_id,
        role,
        wallet: wallet.address,
        transactions,
        start_time,
        end_time: Utc::now(),
        elapsed_ms,
        error: fault,
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
