//! Core data model for the fundbench load-testing harness.
//!
//! # Modules
//!
//! - [`kind`]: the fixed set of simulated contract operations
//! - [`role`]: synthetic user roles and their deterministic assignment
//! - [`wallet`]: pseudo wallet generation (no real key material)
//! - [`payload`]: per-kind structured payloads attached to confirmed records
//! - [`record`]: the transaction record and its terminal-state lifecycle
//! - [`summary`]: per-user summaries and the shared error log entry

pub mod kind;
pub mod payload;
pub mod record;
pub mod role;
pub mod summary;
pub mod wallet;

pub use kind::TransactionKind;
pub use payload::TxPayload;
pub use record::{TransactionRecord, TxStatus};
pub use role::Role;
pub use summary::{ErrorEntry, UserSummary};
pub use wallet::{random_hex, Wallet};
