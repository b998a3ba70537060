//! Fundbench transaction load-testing engine.
//!
//! Drives many synthetic users through weighted, role-biased transaction
//! workloads against a simulated chain, measures latency, throughput and
//! gas under bounded concurrency, and emits a structured performance
//! report for the downstream renderer.
//!
//! # Modules
//!
//! - [`config`]: run configuration and the emulated network profile
//! - [`sampler`]: reusable discrete weighted distribution
//! - [`outcome`]: latency/failure/gas parameterization per transaction kind
//! - [`simulate`]: single-transaction simulation
//! - [`workload`]: per-user workload driver with role-biased selection
//! - [`runner`]: bounded-concurrency orchestration of all users
//! - [`metrics`]: shared aggregation and derived statistics
//! - [`report`]: report artifact assembly and console summary
//!
//! # Example
//!
//! ```ignore
//! use fundbench_engine::{ReportArtifact, TestConfig, TestRunner};
//!
//! let config = TestConfig::default().with_users(20).with_seed(Some(42));
//! let runner = TestRunner::new(config.clone())?;
//! let result = runner.run().await;
//! let artifact = ReportArtifact::assemble(&config, &result);
//! artifact.print_summary();
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod outcome;
pub mod report;
pub mod runner;
pub mod sampler;
pub mod simulate;
pub mod workload;

pub use config::{NetworkProfile, TestConfig};
pub use error::EngineError;
pub use metrics::{AggregateMetrics, KindBreakdown, MetricsAggregator};
pub use outcome::{FixedOutcomeModel, LatencyProfiles, Outcome, OutcomeModel, RandomOutcomeModel};
pub use report::ReportArtifact;
pub use runner::{TestRunResult, TestRunner};
pub use sampler::WeightedSampler;
pub use workload::RoleSamplers;
