//! Fundbench CLI
//!
//! Runs the concurrent transaction load test and writes the JSON
//! performance report consumed by the downstream renderer.
//!
//! # Example
//!
//! ```bash
//! # Default placeholder target, 100 users
//! fundbench
//!
//! # Explicit target and user count, reproducible seed
//! fundbench https://dashboard.example.org/ 40 --seed 42
//! ```

use clap::Parser;
use fundbench_engine::config::{DEFAULT_TARGET_URL, DEFAULT_USERS};
use fundbench_engine::{ReportArtifact, TestConfig, TestRunner};
use std::path::PathBuf;
use std::process;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Fundbench
///
/// Drives synthetic users through weighted, role-biased transaction
/// workloads and reports latency, throughput and gas statistics.
#[derive(Parser, Debug)]
#[command(name = "fundbench")]
#[command(version, about, long_about = None)]
struct Args {
    /// Target dashboard URL, echoed into the report.
    #[arg(default_value = DEFAULT_TARGET_URL)]
    url: String,

    /// Number of synthetic users. Non-numeric input falls back to the
    /// default.
    #[arg(default_value = "100")]
    users: String,

    /// Seed for reproducible runs. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Report output path.
    #[arg(long, default_value = "fundbench-report.json")]
    output: PathBuf,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,fundbench_engine=info")),
        )
        .init();

    let args = Args::parse();

    let users = args.users.parse::<u64>().unwrap_or_else(|_| {
        warn!(input = %args.users, default = DEFAULT_USERS, "user count is not a number, using default");
        DEFAULT_USERS
    });

    let config = TestConfig::default()
        .with_target_url(args.url)
        .with_users(users)
        .with_seed(args.seed);

    println!("=== Fundbench Load Test ===");
    println!("Target: {}", config.target_url);
    println!("Network: {}", config.network.name);
    println!("Users: {}", config.users);
    println!("Transactions/user: {}", config.transactions_per_user);
    println!("Concurrency bound: {}", config.batch_size);

    let runner = match TestRunner::new(config.clone()) {
        Ok(runner) => runner,
        Err(error) => {
            eprintln!("invalid configuration: {error}");
            process::exit(2);
        }
    };

    let result = runner.run().await;
    let artifact = ReportArtifact::assemble(&config, &result);

    // Best effort even after an orchestration fault: whatever data was
    // accumulated still reaches the report.
    match artifact.write_to(&args.output) {
        Ok(()) => println!("\nReport saved to: {}", args.output.display()),
        Err(error) => {
            eprintln!("failed to write report: {error}");
            process::exit(1);
        }
    }

    artifact.print_summary();

    if let Some(fault) = result.fatal {
        eprintln!("test aborted by orchestration fault: {fault}");
        process::exit(1);
    }
}
