//! Pseudo wallet generation.
//!
//! Addresses are random hex drawn from the injected RNG. No real key
//! material is generated; signing is out of scope for the harness.

use rand::Rng;
use serde::{Deserialize, Serialize};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// A synthetic wallet owned by one simulated user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// Hex address in the usual `0x` + 40 digit shape.
    pub address: String,
    /// Mock balance, scaled with the user id so displays show variety.
    pub balance: u64,
}

impl Wallet {
    /// Generate a wallet for a user from the given RNG.
    pub fn generate(user_id: u64, rng: &mut impl Rng) -> Self {
        Self {
            address: random_hex(rng, 40),
            balance: 1_000 + user_id * 10,
        }
    }
}

/// Random `0x`-prefixed lowercase hex string with `digits` digits.
///
/// Used for addresses (40 digits) and transaction / report hashes (64).
pub fn random_hex(rng: &mut impl Rng, digits: usize) -> String {
    let mut out = String::with_capacity(digits + 2);
    out.push_str("0x");
    for _ in 0..digits {
        out.push(HEX_DIGITS[rng.gen_range(0..16)] as char);
    }
    out
}
