//! Per-kind structured payloads attached to confirmed transactions.
//!
//! Each transaction kind carries contract-specific detail so the
//! downstream report renderer can show realistic records. Values are
//! drawn from the injected RNG.

use crate::wallet::random_hex;
use crate::TransactionKind;
use chrono::{Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

const MATERIALS: [&str; 5] = ["Cement", "Steel", "Asphalt", "Aggregate", "Sand"];
const VERIFICATION_STATUSES: [&str; 3] = ["Approved", "Pending", "Additional Documents Required"];
const VERIFIER_ROLES: [&str; 3] = ["District Officer", "Gram Panchayat", "State Authority"];

/// Kind-specific payload for a confirmed transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TxPayload {
    #[serde(rename_all = "camelCase")]
    FundRelease {
        project_id: String,
        phase: u8,
        milestone: String,
        receiver: String,
    },
    #[serde(rename_all = "camelCase")]
    ProjectRegistration {
        project_id: String,
        project_name: String,
        location: String,
        estimated_duration_months: u32,
        total_budget: u64,
        contractor_id: String,
    },
    #[serde(rename_all = "camelCase")]
    MaterialPurchase {
        project_id: String,
        material_type: String,
        quantity: u32,
        vendor: String,
        delivery_date: String,
    },
    #[serde(rename_all = "camelCase")]
    ProgressUpdate {
        project_id: String,
        completion: u8,
        phase: u8,
        report_hash: String,
        image_hashes: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    ContractorVerification {
        contractor_id: String,
        verification_status: String,
        kyc: bool,
        license_number: String,
        verifier_role: String,
    },
}

impl TxPayload {
    /// Generate a payload for the given kind.
    pub fn generate(kind: TransactionKind, rng: &mut impl Rng) -> Self {
        match kind {
            TransactionKind::FundRelease => TxPayload::FundRelease {
                project_id: project_id(rng),
                phase: rng.gen_range(1..=4),
                milestone: format!("Milestone {}", rng.gen_range(1..=5)),
                receiver: random_hex(rng, 40),
            },
            TransactionKind::ProjectRegistration => TxPayload::ProjectRegistration {
                project_id: project_id(rng),
                project_name: format!("Road Construction Phase {}", rng.gen_range(1..=10)),
                location: format!("District {}", rng.gen_range(1..=30)),
                estimated_duration_months: rng.gen_range(6..24),
                total_budget: rng.gen_range(1_000_000..10_000_000),
                contractor_id: contractor_id(rng),
            },
            TransactionKind::MaterialPurchase => TxPayload::MaterialPurchase {
                project_id: project_id(rng),
                material_type: MATERIALS[rng.gen_range(0..MATERIALS.len())].to_string(),
                quantity: rng.gen_range(100..1_100),
                vendor: format!("VENDOR-{}", rng.gen_range(0..500)),
                delivery_date: delivery_date(rng),
            },
            TransactionKind::ProgressUpdate => TxPayload::ProgressUpdate {
                project_id: project_id(rng),
                completion: rng.gen_range(1..=100),
                phase: rng.gen_range(1..=4),
                report_hash: random_hex(rng, 64),
                image_hashes: vec![random_hex(rng, 64), random_hex(rng, 64)],
            },
            TransactionKind::ContractorVerification => TxPayload::ContractorVerification {
                contractor_id: contractor_id(rng),
                verification_status: VERIFICATION_STATUSES
                    [rng.gen_range(0..VERIFICATION_STATUSES.len())]
                .to_string(),
                kyc: rng.gen_bool(0.5),
                license_number: format!("LIC-{}", rng.gen_range(0..100_000)),
                verifier_role: VERIFIER_ROLES[rng.gen_range(0..VERIFIER_ROLES.len())].to_string(),
            },
        }
    }

    /// The kind this payload belongs to.
    pub fn kind(&self) -> TransactionKind {
        match self {
            TxPayload::FundRelease { .. } => TransactionKind::FundRelease,
            TxPayload::ProjectRegistration { .. } => TransactionKind::ProjectRegistration,
            TxPayload::MaterialPurchase { .. } => TransactionKind::MaterialPurchase,
            TxPayload::ProgressUpdate { .. } => TransactionKind::ProgressUpdate,
            TxPayload::ContractorVerification { .. } => TransactionKind::ContractorVerification,
        }
    }
}

fn project_id(rng: &mut impl Rng) -> String {
    format!("PROJ-{}", rng.gen_range(0..10_000))
}

fn contractor_id(rng: &mut impl Rng) -> String {
    format!("CONTR-{}", rng.gen_range(0..1_000))
}

/// ISO date up to 30 days out, e.g. `2026-09-12`.
fn delivery_date(rng: &mut impl Rng) -> String {
    let days = rng.gen_range(0..30);
    (Utc::now() + Duration::days(days)).date_naive().to_string()
}
