//! Transaction kinds exercised by the workload.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of contract operations the harness drives.
///
/// Wire names match the report artifact consumed by the downstream
/// renderer (`fundRelease`, `projectRegistration`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionKind {
    FundRelease,
    ProjectRegistration,
    MaterialPurchase,
    ProgressUpdate,
    ContractorVerification,
}

impl TransactionKind {
    /// All kinds, in artifact order.
    pub const ALL: [TransactionKind; 5] = [
        TransactionKind::FundRelease,
        TransactionKind::ProjectRegistration,
        TransactionKind::MaterialPurchase,
        TransactionKind::ProgressUpdate,
        TransactionKind::ContractorVerification,
    ];

    /// Wire name used in the report artifact.
    pub fn name(&self) -> &'static str {
        match self {
            TransactionKind::FundRelease => "fundRelease",
            TransactionKind::ProjectRegistration => "projectRegistration",
            TransactionKind::MaterialPurchase => "materialPurchase",
            TransactionKind::ProgressUpdate => "progressUpdate",
            TransactionKind::ContractorVerification => "contractorVerification",
        }
    }

    /// Whether this operation moves funds. Non-monetary kinds always
    /// carry a zero amount.
    pub fn is_monetary(&self) -> bool {
        matches!(
            self,
            TransactionKind::FundRelease
                | TransactionKind::ProjectRegistration
                | TransactionKind::MaterialPurchase
        )
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_serde() {
        for kind in TransactionKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }

    #[test]
    fn round_trips() {
        for kind in TransactionKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            let back: TransactionKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn monetary_split() {
        assert!(TransactionKind::FundRelease.is_monetary());
        assert!(TransactionKind::ProjectRegistration.is_monetary());
        assert!(TransactionKind::MaterialPurchase.is_monetary());
        assert!(!TransactionKind::ProgressUpdate.is_monetary());
        assert!(!TransactionKind::ContractorVerification.is_monetary());
    }
}
