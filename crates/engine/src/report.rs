//! Report artifact assembly and rendering.
//!
//! Shapes a finished run into the JSON artifact the downstream renderer
//! consumes, and prints a condensed console summary. The artifact write
//! is atomic: the JSON lands in a sibling temp file that is renamed
//! over the target.

use crate::config::{NetworkProfile, TestConfig};
use crate::error::EngineError;
use crate::metrics::{KindBreakdown, PerformanceSummary, TransactionTotals};
use crate::runner::TestRunResult;
use chrono::{DateTime, Utc};
use fundbench_types::{ErrorEntry, TransactionKind, TransactionRecord, UserSummary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The complete report artifact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportArtifact {
    pub summary: ReportSummary,
    /// Ordered list of every terminal transaction, for charting.
    pub time_series_data: Vec<TransactionRecord>,
    pub user_details: Vec<UserSummary>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub test_config: ConfigEcho,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(rename = "totalDuration")]
    pub total_duration_ms: f64,
    pub transactions: TransactionTotals,
    pub performance: PerformanceSummary,
    pub transactions_by_type: BTreeMap<TransactionKind, KindBreakdown>,
    pub errors: Vec<ErrorEntry>,
}

/// Echo of the configuration the run executed with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEcho {
    pub url: String,
    pub users: u64,
    pub transactions_per_user: u32,
    pub blockchain: NetworkProfile,
}

impl ReportArtifact {
    /// Shape a finished (or best-effort partial) run into the artifact.
    pub fn assemble(config: &TestConfig, result: &TestRunResult) -> Self {
        Self {
            summary: ReportSummary {
                test_config: ConfigEcho {
                    url: config.target_url.clone(),
                    users: config.users,
                    transactions_per_user: config.transactions_per_user,
                    blockchain: config.network.clone(),
                },
                start_time: result.start_time,
                end_time: result.end_time,
                total_duration_ms: result.elapsed.as_secs_f64() * 1_000.0,
                transactions: result.metrics.transactions.clone(),
                performance: result.metrics.performance.clone(),
                transactions_by_type: result.metrics.by_kind.clone(),
                errors: result.errors.clone(),
            },
            time_series_data: result.time_series.clone(),
            user_details: result.users.clone(),
        }
    }

    /// Write the artifact as pretty JSON, atomically.
    pub fn write_to(&self, path: &Path) -> Result<(), EngineError> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Print the condensed console summary.
    pub fn print_summary(&self) {
        let summary = &self.summary;
        let perf = &summary.performance;

        println!("\n=== Fundbench Performance Report ===");
        println!("Target: {}", summary.test_config.url);
        println!("Duration: {:.2}s", summary.total_duration_ms / 1_000.0);
        println!(
            "Transactions: {} total | {} confirmed | {} failed",
            summary.transactions.total, summary.transactions.successful, summary.transactions.failed
        );
        println!("Success rate: {:.2}%", summary.transactions.success_rate);
        println!("Throughput: {:.2} TPS", perf.throughput);
        println!(
            "Latency: avg {} | min {} | max {} | p95 {}",
            format_latency(perf.latency.average),
            format_latency(perf.latency.min),
            format_latency(perf.latency.max),
            format_latency(perf.latency.p95),
        );
        println!(
            "Gas: total {} | avg {:.0}",
            perf.gas_used.total, perf.gas_used.average
        );
        println!("Block utilization: {:.2}%", perf.block_utilization);

        if summary.transactions_by_type.is_empty() {
            println!("\nBy type: no data");
        } else {
            println!("\nBy type:");
            for (kind, breakdown) in &summary.transactions_by_type {
                println!(
                    "  {}: {} txs, {} confirmed, {} avg",
                    kind,
                    breakdown.count,
                    breakdown.successful,
                    format_latency(breakdown.avg_latency),
                );
            }
        }

        if !summary.errors.is_empty() {
            println!("\nErrors logged: {}", summary.errors.len());
        }
    }
}

/// Format a millisecond latency, switching to seconds past 1000ms.
fn format_latency(ms: f64) -> String {
    if ms < 1_000.0 {
        format!("{ms:.2}ms")
    } else {
        format!("{:.2}s", ms / 1_000.0)
    }
}
