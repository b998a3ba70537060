//! Synthetic user roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Participant role assigned to a synthetic user.
///
/// Roles bias the transaction mix each user submits: officials mostly
/// release funds and verify contractors, contractors register projects
/// and report progress, auditors follow the global distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Government Official")]
    Official,
    Contractor,
    Auditor,
}

impl Role {
    /// Deterministic assignment by user id.
    ///
    /// Ids congruent to 0 mod 3 are officials, 1 contractors, 2 auditors.
    /// Repeated runs with the same ids always yield the same roles.
    pub fn for_user(user_id: u64) -> Self {
        match user_id % 3 {
            0 => Role::Official,
            1 => Role::Contractor,
            _ => Role::Auditor,
        }
    }

    /// Human-readable role label used in the report artifact.
    pub fn name(&self) -> &'static str {
        match self {
            Role::Official => "Government Official",
            Role::Contractor => "Contractor",
            Role::Auditor => "Auditor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_is_deterministic() {
        let expected = [
            (1, Role::Contractor),
            (2, Role::Auditor),
            (3, Role::Official),
            (4, Role::Contractor),
            (5, Role::Auditor),
            (6, Role::Official),
        ];
        for (id, role) in expected {
            assert_eq!(Role::for_user(id), role);
            // Same id, same role, every time.
            assert_eq!(Role::for_user(id), Role::for_user(id));
        }
    }

    #[test]
    fn serializes_long_labels() {
        let json = serde_json::to_string(&Role::Official).unwrap();
        assert_eq!(json, "\"Government Official\"");
    }
}
