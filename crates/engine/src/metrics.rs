//! Shared metrics accumulation and derived statistics.
//!
//! The aggregator is the only state mutated from multiple concurrent
//! call sites, so it hands out cheap clones over one `parking_lot`
//! mutex. Finalization is read-only over the accumulated raw state and
//! may run any number of times; all derived math is order-independent
//! (sums, min/max, sorted-then-indexed percentiles).

use crate::config::NetworkProfile;
use fundbench_types::{ErrorEntry, TransactionKind, TransactionRecord, TxStatus};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Shared, continuously updated accumulator for the run.
#[derive(Clone, Default)]
pub struct MetricsAggregator {
    inner: Arc<Mutex<MetricsInner>>,
}

struct MetricsInner {
    per_kind: BTreeMap<TransactionKind, KindCounters>,
    /// Every terminal record, in arrival order.
    time_series: Vec<TransactionRecord>,
    errors: Vec<ErrorEntry>,
    gas_total: u64,
    min_latency_ms: f64,
    max_latency_ms: f64,
}

impl Default for MetricsInner {
    fn default() -> Self {
        Self {
            per_kind: BTreeMap::new(),
            time_series: Vec::new(),
            errors: Vec::new(),
            gas_total: 0,
            min_latency_ms: f64::INFINITY,
            max_latency_ms: 0.0,
        }
    }
}

#[derive(Clone, Default)]
struct KindCounters {
    attempted: u64,
    succeeded: u64,
    failed: u64,
    /// Raw latencies of succeeded transactions, milliseconds.
    latencies_ms: Vec<f64>,
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one terminal transaction.
    pub fn record(&self, record: &TransactionRecord) {
        debug_assert!(record.status.is_terminal(), "record must be terminal");
        if !record.status.is_terminal() {
            return;
        }
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let counters = inner.per_kind.entry(record.kind).or_default();
        counters.attempted += 1;
        match record.status {
            TxStatus::Confirmed => {
                counters.succeeded += 1;
                counters.latencies_ms.push(record.latency_ms);
                inner.gas_total += record.gas_used;
                if record.latency_ms < inner.min_latency_ms {
                    inner.min_latency_ms = record.latency_ms;
                }
                if record.latency_ms > inner.max_latency_ms {
                    inner.max_latency_ms = record.latency_ms;
                }
            }
            TxStatus::Failed => counters.failed += 1,
            TxStatus::Pending => return,
        }
        inner.time_series.push(record.clone());
    }

    /// Append an entry to the run's error log.
    pub fn record_error(&self, entry: ErrorEntry) {
        self.inner.lock().errors.push(entry);
    }

    /// Snapshot of the ordered time series.
    pub fn time_series(&self) -> Vec<TransactionRecord> {
        self.inner.lock().time_series.clone()
    }

    /// Snapshot of the error log.
    pub fn errors(&self) -> Vec<ErrorEntry> {
        self.inner.lock().errors.clone()
    }

    /// Derive the finalized statistics for the given wall-clock elapsed
    /// time. Never mutates the raw counters or latency lists, so calling
    /// twice with the same arguments yields the same result.
    pub fn finalize(&self, elapsed: Duration, network: &NetworkProfile) -> AggregateMetrics {
        let inner = self.inner.lock();

        let mut total = 0;
        let mut successful = 0;
        let mut failed = 0;
        let mut all_latencies = Vec::new();
        let mut by_kind = BTreeMap::new();

        for (kind, counters) in &inner.per_kind {
            total += counters.attempted;
            successful += counters.succeeded;
            failed += counters.failed;
            all_latencies.extend_from_slice(&counters.latencies_ms);
            by_kind.insert(
                *kind,
                KindBreakdown {
                    count: counters.attempted,
                    successful: counters.succeeded,
                    failed: counters.failed,
                    avg_latency: mean(&counters.latencies_ms),
                    latencies: counters.latencies_ms.clone(),
                },
            );
        }

        let elapsed_ms = elapsed.as_secs_f64() * 1_000.0;
        let success_rate = if total > 0 {
            round2(successful as f64 / total as f64 * 100.0)
        } else {
            0.0
        };
        let throughput = if elapsed_ms > 0.0 {
            successful as f64 / (elapsed_ms / 1_000.0)
        } else {
            0.0
        };
        let avg_gas = if successful > 0 {
            inner.gas_total as f64 / successful as f64
        } else {
            0.0
        };
        let utilization = if elapsed_ms > 0.0 {
            let tx_per_block = successful as f64 / (elapsed_ms / network.block_time_ms as f64);
            round2((tx_per_block / network.block_capacity as f64 * 100.0).min(100.0))
        } else {
            0.0
        };

        AggregateMetrics {
            transactions: TransactionTotals {
                total,
                successful,
                failed,
                success_rate,
            },
            performance: PerformanceSummary {
                throughput,
                latency: LatencySummary {
                    average: mean(&all_latencies),
                    min: if inner.min_latency_ms.is_finite() {
                        inner.min_latency_ms
                    } else {
                        0.0
                    },
                    max: inner.max_latency_ms,
                    p95: p95(&all_latencies),
                },
                gas_used: GasSummary {
                    total: inner.gas_total,
                    average: avg_gas,
                },
                block_utilization: utilization,
            },
            by_kind,
        }
    }
}

/// Finalized, derived statistics for the whole run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateMetrics {
    pub transactions: TransactionTotals,
    pub performance: PerformanceSummary,
    /// Per-kind breakdown, keyed by wire name in the artifact.
    pub by_kind: BTreeMap<TransactionKind, KindBreakdown>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTotals {
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
    /// Percentage in `[0, 100]`, rounded to two decimals.
    pub success_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    /// Successful transactions per wall-clock second.
    pub throughput: f64,
    pub latency: LatencySummary,
    pub gas_used: GasSummary,
    /// Estimated share of assumed block capacity, `[0, 100]`.
    pub block_utilization: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub p95: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GasSummary {
    pub total: u64,
    pub average: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindBreakdown {
    pub count: u64,
    pub successful: u64,
    pub failed: u64,
    pub avg_latency: f64,
    /// Raw succeeded latencies, shipped for downstream charting.
    pub latencies: Vec<f64>,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// p95 over the raw latency list: sort ascending, take the element at
/// `floor(n * 0.95)`. Falls open to 0 on an empty list.
fn p95(latencies: &[f64]) -> f64 {
    if latencies.is_empty() {
        return 0.0;
    }
    let mut sorted = latencies.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let idx = (sorted.len() as f64 * 0.95).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Round to two decimal places, matching the artifact's percentage
/// precision.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundbench_types::TxPayload;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn confirmed(kind: TransactionKind, latency_ms: f64, gas_used: u64) -> TransactionRecord {
        let mut rng = ChaCha8Rng::seed_from_u64(latency_ms as u64);
        let mut record = TransactionRecord::pending(kind, "0xabc".to_string(), 1_000, 100_000);
        record.confirm(
            "0xhash".to_string(),
            gas_used,
            latency_ms,
            TxPayload::generate(kind, &mut rng),
        );
        record
    }

    fn failed(kind: TransactionKind, latency_ms: f64) -> TransactionRecord {
        let mut record = TransactionRecord::pending(kind, "0xabc".to_string(), 1_000, 100_000);
        record.fail("reverted", latency_ms);
        record
    }

    fn network() -> NetworkProfile {
        NetworkProfile::default()
    }

    #[test]
    fn attempted_equals_succeeded_plus_failed() {
        let metrics = MetricsAggregator::new();
        metrics.record(&confirmed(TransactionKind::FundRelease, 10.0, 30_000));
        metrics.record(&confirmed(TransactionKind::FundRelease, 20.0, 40_000));
        metrics.record(&failed(TransactionKind::FundRelease, 5.0));
        metrics.record(&failed(TransactionKind::ProgressUpdate, 7.0));

        let agg = metrics.finalize(Duration::from_secs(1), &network());
        assert_eq!(agg.transactions.total, 4);
        assert_eq!(
            agg.transactions.total,
            agg.transactions.successful + agg.transactions.failed
        );
        for breakdown in agg.by_kind.values() {
            assert_eq!(breakdown.count, breakdown.successful + breakdown.failed);
        }
        assert_eq!(agg.performance.gas_used.total, 70_000);
    }

    #[test]
    fn p95_uses_floor_index_over_sorted_list() {
        // Latencies 1..=100: index floor(100 * 0.95) = 95, value 96.
        let metrics = MetricsAggregator::new();
        for i in 1..=100 {
            metrics.record(&confirmed(TransactionKind::FundRelease, i as f64, 1));
        }
        let agg = metrics.finalize(Duration::from_secs(10), &network());
        assert_eq!(agg.performance.latency.p95, 96.0);
        assert_eq!(agg.performance.latency.min, 1.0);
        assert_eq!(agg.performance.latency.max, 100.0);
        assert_eq!(agg.performance.latency.average, 50.5);
    }

    #[test]
    fn statistics_are_order_independent() {
        let latencies = [42.0, 3.0, 17.0, 99.0, 58.0, 1.0, 76.0, 12.0];

        let forward = MetricsAggregator::new();
        for l in latencies {
            forward.record(&confirmed(TransactionKind::MaterialPurchase, l, 10));
        }
        let backward = MetricsAggregator::new();
        for l in latencies.iter().rev() {
            backward.record(&confirmed(TransactionKind::MaterialPurchase, *l, 10));
        }

        let elapsed = Duration::from_secs(2);
        let a = forward.finalize(elapsed, &network());
        let b = backward.finalize(elapsed, &network());
        assert_eq!(a.performance.latency.average, b.performance.latency.average);
        assert_eq!(a.performance.latency.p95, b.performance.latency.p95);
        assert_eq!(a.transactions, b.transactions);
    }

    #[test]
    fn finalize_is_idempotent() {
        let metrics = MetricsAggregator::new();
        metrics.record(&confirmed(TransactionKind::FundRelease, 25.0, 55_000));
        metrics.record(&failed(TransactionKind::ContractorVerification, 9.0));

        let elapsed = Duration::from_millis(1_500);
        let first = metrics.finalize(elapsed, &network());
        let second = metrics.finalize(elapsed, &network());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_run_fails_open_to_zeros() {
        let metrics = MetricsAggregator::new();
        let agg = metrics.finalize(Duration::from_secs(1), &network());
        assert_eq!(agg.transactions.total, 0);
        assert_eq!(agg.transactions.success_rate, 0.0);
        assert_eq!(agg.performance.latency.p95, 0.0);
        assert_eq!(agg.performance.latency.min, 0.0);
        assert_eq!(agg.performance.throughput, 0.0);
        assert_eq!(agg.performance.gas_used.average, 0.0);
        assert!(agg.by_kind.is_empty());
    }

    #[test]
    fn success_rate_is_bounded_percentage() {
        let metrics = MetricsAggregator::new();
        metrics.record(&confirmed(TransactionKind::FundRelease, 10.0, 1));
        metrics.record(&failed(TransactionKind::FundRelease, 10.0));
        metrics.record(&failed(TransactionKind::FundRelease, 10.0));

        let agg = metrics.finalize(Duration::from_secs(1), &network());
        assert!((0.0..=100.0).contains(&agg.transactions.success_rate));
        assert_eq!(agg.transactions.success_rate, 33.33);
    }

    #[test]
    fn error_log_accumulates() {
        let metrics = MetricsAggregator::new();
        metrics.record_error(ErrorEntry::for_kind(
            TransactionKind::FundRelease,
            "reverted",
        ));
        metrics.record_error(ErrorEntry::for_user(4, "loop fault"));
        assert_eq!(metrics.errors().len(), 2);
    }
}
