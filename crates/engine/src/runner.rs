//! Bounded-concurrency test orchestration.
//!
//! One task per user, all spawned up front; a semaphore with
//! `batch_size` permits bounds how many are in flight at once. Each
//! user's delay is mostly idle wait, so bounded overlap is where the
//! throughput comes from. Completion order within the bound is not
//! guaranteed; summaries are sorted by user id for a deterministic
//! artifact.

use crate::config::TestConfig;
use crate::metrics::{AggregateMetrics, MetricsAggregator};
use crate::outcome::{LatencyProfiles, OutcomeModel, RandomOutcomeModel};
use crate::workload::{run_user, RoleSamplers, WorkloadContext};
use chrono::{DateTime, Utc};
use fundbench_types::{ErrorEntry, TransactionRecord, UserSummary};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Raw output of one complete run, input to the report assembler.
#[derive(Clone, Debug)]
pub struct TestRunResult {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub elapsed: Duration,
    /// Per-user summaries, ordered by user id.
    pub users: Vec<UserSummary>,
    pub metrics: AggregateMetrics,
    /// Every terminal transaction in arrival order.
    pub time_series: Vec<TransactionRecord>,
    pub errors: Vec<ErrorEntry>,
    /// Set when a worker task was lost entirely; the run still produces
    /// a best-effort result and the process should exit non-zero.
    pub fatal: Option<String>,
}

/// Orchestrates a full load-test run.
pub struct TestRunner {
    config: TestConfig,
    model: Arc<dyn OutcomeModel>,
    metrics: MetricsAggregator,
}

impl TestRunner {
    /// Build a runner with the default random outcome model.
    pub fn new(config: TestConfig) -> Result<Self, crate::EngineError> {
        let profiles = LatencyProfiles::sepolia()
            .with_delay_ceiling(Duration::from_millis(config.delay_ceiling_ms));
        Self::with_model(config, Arc::new(RandomOutcomeModel::new(profiles)))
    }

    /// Build a runner with an injected outcome model (test seam).
    pub fn with_model(
        config: TestConfig,
        model: Arc<dyn OutcomeModel>,
    ) -> Result<Self, crate::EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            model,
            metrics: MetricsAggregator::new(),
        })
    }

    /// Handle onto the shared aggregator.
    pub fn metrics(&self) -> MetricsAggregator {
        self.metrics.clone()
    }

    /// Run every user to completion and finalize the metrics.
    pub async fn run(&self) -> TestRunResult {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        info!(
            users = self.config.users,
            transactions_per_user = self.config.transactions_per_user,
            batch_size = self.config.batch_size,
            seed,
            "starting load test"
        );

        let started = Instant::now();
        let start_time = Utc::now();

        let semaphore = Arc::new(Semaphore::new(self.config.batch_size));
        let ctx = Arc::new(WorkloadContext {
            model: Arc::clone(&self.model),
            metrics: self.metrics.clone(),
            samplers: RoleSamplers::standard(),
            transactions_per_user: self.config.transactions_per_user,
            pause_ms: self.config.pause_ms,
        });

        let mut tasks = JoinSet::new();
        for user_id in 1..=self.config.users {
            let semaphore = Arc::clone(&semaphore);
            let ctx = Arc::clone(&ctx);
            let user_seed = seed.wrapping_add(user_id);
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("semaphore is never closed");
                run_user(user_id, &ctx, user_seed).await
            });
        }

        let mut users = Vec::with_capacity(self.config.users as usize);
        let mut fatal = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(summary) => {
                    debug!(user_id = summary.user_id, "user task joined");
                    users.push(summary);
                }
                Err(join_error) => {
                    // The per-user boundary already contains loop faults;
                    // losing a whole task is an orchestration failure.
                    error!(error = %join_error, "worker task lost");
                    self.metrics
                        .record_error(ErrorEntry::fatal(format!("worker task lost: {join_error}")));
                    fatal = Some(join_error.to_string());
                }
            }
        }
        users.sort_by_key(|summary| summary.user_id);

        let elapsed = started.elapsed();
        let metrics = self.metrics.finalize(elapsed, &self.config.network);
        info!(
            total = metrics.transactions.total,
            successful = metrics.transactions.successful,
            failed = metrics.transactions.failed,
            elapsed_secs = elapsed.as_secs_f64(),
            "load test finished"
        );

        TestRunResult {
            start_time,
            end_time: Utc::now(),
            elapsed,
            users,
            metrics,
            time_series: self.metrics.time_series(),
            errors: self.metrics.errors(),
            fatal,
        }
    }
}
