//! Single-transaction simulation.
//!
//! Executes exactly one submission attempt for one wallet: draw an
//! amount and an outcome, wait out the modeled delay (the engine's only
//! suspension point), then settle the record into its terminal state
//! and push it into the shared aggregator.

use crate::metrics::MetricsAggregator;
use crate::outcome::OutcomeModel;
use fundbench_types::{random_hex, ErrorEntry, TransactionKind, TransactionRecord, TxPayload, Wallet};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;
use tracing::debug;

/// Human-readable failure reasons for simulated business failures.
pub const FAILURE_REASONS: [&str; 5] = [
    "network congestion",
    "insufficient gas",
    "reverted",
    "stale nonce",
    "pending timeout",
];

/// Simulate one transaction to a terminal state.
///
/// A failed draw is a valid business outcome, recorded as a `Failed`
/// record plus an error-log entry; it is never an `Err` to the caller.
pub async fn simulate_transaction(
    wallet: &Wallet,
    kind: TransactionKind,
    model: &dyn OutcomeModel,
    metrics: &MetricsAggregator,
    rng: &mut ChaCha8Rng,
) -> TransactionRecord {
    let amount = draw_amount(kind, rng);
    let outcome = model.draw(kind, rng);
    let mut record =
        TransactionRecord::pending(kind, wallet.address.clone(), amount, outcome.gas_limit);

    let submitted = Instant::now();
    tokio::time::sleep(outcome.delay).await;
    let latency_ms = submitted.elapsed().as_secs_f64() * 1_000.0;

    if rng.gen::<f64>() < outcome.failure_probability {
        let reason = FAILURE_REASONS[rng.gen_range(0..FAILURE_REASONS.len())];
        record.fail(reason, latency_ms);
        metrics.record_error(ErrorEntry::for_kind(kind, reason));
        debug!(kind = %kind, reason, latency_ms, "transaction failed");
    } else {
        let tx_hash = random_hex(rng, 64);
        let gas_used = (outcome.gas_limit as f64 * rng.gen_range(0.7..1.0)).floor() as u64;
        let payload = TxPayload::generate(kind, rng);
        record.confirm(tx_hash, gas_used, latency_ms, payload);
        debug!(kind = %kind, latency_ms, gas_used, "transaction confirmed");
    }

    metrics.record(&record);
    record
}

/// Draw a fund amount appropriate to the kind. Non-monetary kinds carry
/// zero.
fn draw_amount(kind: TransactionKind, rng: &mut ChaCha8Rng) -> u64 {
    match kind {
        TransactionKind::FundRelease => rng.gen_range(10_000..60_000),
        TransactionKind::ProjectRegistration => rng.gen_range(100_000..300_000),
        TransactionKind::MaterialPurchase => rng.gen_range(5_000..35_000),
        TransactionKind::ProgressUpdate | TransactionKind::ContractorVerification => 0,
    }
}
