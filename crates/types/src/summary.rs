//! Per-user run summaries and the shared error log.

use crate::{Role, TransactionKind, TransactionRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything one synthetic user did during the run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: u64,
    pub role: Role,
    /// Wallet address the user submitted from.
    pub wallet: String,
    /// Ordered list of this user's transactions.
    pub transactions: Vec<TransactionRecord>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(rename = "totalTimeMs")]
    pub elapsed_ms: f64,
    /// Orchestration fault that cut the user's loop short, if any.
    /// Simulated transaction failures never appear here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One entry in the run's error log.
///
/// Written once per simulated transaction failure and once per
/// orchestration fault; the log length therefore tracks the global
/// failure count plus any faults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEntry {
    #[serde(rename = "txType", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorEntry {
    /// Entry for a simulated transaction failure of the given kind.
    pub fn for_kind(kind: TransactionKind, message: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            user_id: None,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Entry for an orchestration fault inside one user's loop.
    pub fn for_user(user_id: u64, message: impl Into<String>) -> Self {
        Self {
            kind: None,
            user_id: Some(user_id),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Entry for a fault outside any single user's loop.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            kind: None,
            user_id: None,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_entry_constructors() {
        let kind_entry = ErrorEntry::for_kind(TransactionKind::FundRelease, "reverted");
        assert_eq!(kind_entry.kind, Some(TransactionKind::FundRelease));
        assert_eq!(kind_entry.user_id, None);

        let user_entry = ErrorEntry::for_user(7, "worker fault");
        assert_eq!(user_entry.user_id, Some(7));
        assert_eq!(user_entry.kind, None);

        let fatal = ErrorEntry::fatal("scheduler fault");
        assert!(fatal.kind.is_none() && fatal.user_id.is_none());
    }

    #[test]
    fn summary_serializes_camel_case() {
        let summary = UserSummary {
            user_id: 3,
            role: Role::for_user(3),
            wallet: "0xabc".to_string(),
            transactions: Vec::new(),
            start_time: Utc::now(),
            end_time: Utc::now(),
            elapsed_ms: 12.5,
            error: None,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["userId"], 3);
        assert_eq!(value["role"], "Government Official");
        assert_eq!(value["totalTimeMs"], 12.5);
        assert!(value.get("error").is_none());
    }
}
