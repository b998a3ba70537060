//! Run configuration.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Default target URL echoed into the report artifact.
pub const DEFAULT_TARGET_URL: &str = "https://fundbench.example.invalid/";
/// Default number of synthetic users.
pub const DEFAULT_USERS: u64 = 100;
/// Transactions each user submits.
pub const DEFAULT_TRANSACTIONS_PER_USER: u32 = 5;
/// Maximum number of users in flight at once.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Parameters of the emulated chain, echoed into the report and used
/// for the block-utilization estimate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    pub name: String,
    pub block_time_ms: u64,
    /// Assumed transactions per block for the utilization estimate.
    pub block_capacity: u64,
    pub gas_price: String,
    pub gas_limit: u64,
    pub confirmation_blocks: u32,
}

impl Default for NetworkProfile {
    fn default() -> Self {
        Self {
            name: "Ethereum Sepolia Testnet".to_string(),
            block_time_ms: 12_000,
            block_capacity: 200,
            gas_price: "10 gwei".to_string(),
            gas_limit: 21_000,
            confirmation_blocks: 2,
        }
    }
}

/// Full configuration for one load-test run.
#[derive(Clone, Debug)]
pub struct TestConfig {
    /// Target dashboard URL. Purely descriptive; no network traffic is
    /// generated.
    pub target_url: String,
    pub users: u64,
    pub transactions_per_user: u32,
    /// Concurrency bound on in-flight users.
    pub batch_size: usize,
    /// Seed for reproducible runs. Random when unset.
    pub seed: Option<u64>,
    /// Half-open inter-transaction pause range in milliseconds.
    pub pause_ms: (u64, u64),
    /// Upper bound on any simulated confirmation delay, in milliseconds.
    pub delay_ceiling_ms: u64,
    pub network: NetworkProfile,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            users: DEFAULT_USERS,
            transactions_per_user: DEFAULT_TRANSACTIONS_PER_USER,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
            pause_ms: (1_000, 2_000),
            delay_ceiling_ms: 15_000,
            network: NetworkProfile::default(),
        }
    }
}

impl TestConfig {
    pub fn with_target_url(mut self, url: impl Into<String>) -> Self {
        self.target_url = url.into();
        self
    }

    pub fn with_users(mut self, users: u64) -> Self {
        self.users = users;
        self
    }

    pub fn with_transactions_per_user(mut self, count: u32) -> Self {
        self.transactions_per_user = count;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_pause_ms(mut self, pause_ms: (u64, u64)) -> Self {
        self.pause_ms = pause_ms;
        self
    }

    pub fn with_delay_ceiling_ms(mut self, ceiling_ms: u64) -> Self {
        self.delay_ceiling_ms = ceiling_ms;
        self
    }

    pub fn with_network(mut self, network: NetworkProfile) -> Self {
        self.network = network;
        self
    }

    /// Validate the configuration before a run.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.users == 0 {
            return Err(EngineError::Config("users must be at least 1".into()));
        }
        if self.transactions_per_user == 0 {
            return Err(EngineError::Config(
                "transactions_per_user must be at least 1".into(),
            ));
        }
        if self.batch_size == 0 {
            return Err(EngineError::Config("batch_size must be at least 1".into()));
        }
        if self.pause_ms.1 < self.pause_ms.0 {
            return Err(EngineError::Config(
                "pause_ms upper bound is below the lower bound".into(),
            ));
        }
        if self.network.block_time_ms == 0 || self.network.block_capacity == 0 {
            return Err(EngineError::Config(
                "network block time and capacity must be positive".into(),
            ));
        }
        Ok(())
    }
}
