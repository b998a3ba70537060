//! Transaction records and their lifecycle.

use crate::{TransactionKind, TxPayload};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a simulated transaction.
///
/// `Pending` is the only non-terminal state; a record moves out of it
/// exactly once, to `Confirmed` or `Failed`, and never transitions again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Pending,
    Confirmed,
    Failed,
}

impl TxStatus {
    /// Whether this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TxStatus::Pending)
    }
}

/// One submission attempt and its terminal outcome.
///
/// Created pending at submission time; each record represents exactly
/// one attempt, with no retries and no reuse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "txType")]
    pub kind: TransactionKind,
    /// Submitting wallet address.
    pub from: String,
    /// Fund amount moved, zero for non-monetary kinds.
    #[serde(rename = "fundAmount")]
    pub amount: u64,
    /// Gas budget requested at submission.
    #[serde(rename = "gasRequested")]
    pub gas_requested: u64,
    /// Gas actually consumed; zero until confirmed.
    #[serde(rename = "gasUsed")]
    pub gas_used: u64,
    pub status: TxStatus,
    /// End-to-end latency in milliseconds, zero until terminal.
    #[serde(rename = "latency")]
    pub latency_ms: f64,
    #[serde(rename = "txHash", skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Submission timestamp.
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "additionalData", skip_serializing_if = "Option::is_none")]
    pub payload: Option<TxPayload>,
}

impl TransactionRecord {
    /// Create a record in the pending state at submission time.
    pub fn pending(kind: TransactionKind, from: String, amount: u64, gas_requested: u64) -> Self {
        Self {
            kind,
            from,
            amount,
            gas_requested,
            gas_used: 0,
            status: TxStatus::Pending,
            latency_ms: 0.0,
            tx_hash: None,
            error: None,
            timestamp: Utc::now(),
            payload: None,
        }
    }

    /// Move the record to its `Confirmed` terminal state.
    pub fn confirm(&mut self, tx_hash: String, gas_used: u64, latency_ms: f64, payload: TxPayload) {
        debug_assert_eq!(self.status, TxStatus::Pending, "record already terminal");
        self.status = TxStatus::Confirmed;
        self.tx_hash = Some(tx_hash);
        self.gas_used = gas_used;
        self.latency_ms = latency_ms;
        self.payload = Some(payload);
    }

    /// Move the record to its `Failed` terminal state.
    pub fn fail(&mut self, reason: impl Into<String>, latency_ms: f64) {
        debug_assert_eq!(self.status, TxStatus::Pending, "record already terminal");
        self.status = TxStatus::Failed;
        self.error = Some(reason.into());
        self.latency_ms = latency_ms;
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == TxStatus::Confirmed
    }

    pub fn is_failed(&self) -> bool {
        self.status == TxStatus::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pending() -> TransactionRecord {
        TransactionRecord::pending(
            TransactionKind::FundRelease,
            "0xabc".to_string(),
            25_000,
            100_000,
        )
    }

    #[test]
    fn confirm_sets_terminal_fields() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let payload = TxPayload::generate(TransactionKind::FundRelease, &mut rng);
        let mut record = pending();
        record.confirm("0xdeadbeef".to_string(), 82_000, 123.4, payload);

        assert!(record.is_confirmed());
        assert!(record.status.is_terminal());
        assert_eq!(record.gas_used, 82_000);
        assert_eq!(record.latency_ms, 123.4);
        assert!(record.tx_hash.is_some());
        assert!(record.error.is_none());
    }

    #[test]
    fn fail_sets_reason() {
        let mut record = pending();
        record.fail("network congestion", 50.0);

        assert!(record.is_failed());
        assert_eq!(record.error.as_deref(), Some("network congestion"));
        assert!(record.tx_hash.is_none());
        assert_eq!(record.gas_used, 0);
    }

    #[test]
    fn serde_uses_wire_names() {
        let record = pending();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["txType"], "fundRelease");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["fundAmount"], 25_000);
        // Absent optionals are omitted so the renderer sees clean records.
        assert!(value.get("txHash").is_none());
        assert!(value.get("error").is_none());
    }

    #[test]
    fn record_round_trips() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let payload = TxPayload::generate(TransactionKind::MaterialPurchase, &mut rng);
        let mut record = TransactionRecord::pending(
            TransactionKind::MaterialPurchase,
            "0xfeed".to_string(),
            9_000,
            60_000,
        );
        record.confirm("0x1234".to_string(), 45_000, 88.8, payload);

        let json = serde_json::to_string(&record).unwrap();
        let back: TransactionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
