//! # Core Types
//!
//! Identifiers and per-token configuration shared across the engine.

use std::fmt;

use ethnum::U256;
use serde::{Deserialize, Serialize};

/// Opaque 20-byte identifier used for both tokens and caller identities.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Address carrying `value` in its low eight bytes. Handy for tests
    /// and tooling.
    pub fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&value.to_be_bytes());
        Address(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

/// Trade direction, from the reserve's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    /// Reserve sells the token (caller buys).
    Buy,
    /// Reserve buys the token (caller sells).
    Sell,
}

impl TradeSide {
    pub fn from_is_buy(is_buy: bool) -> Self {
        if is_buy {
            TradeSide::Buy
        } else {
            TradeSide::Sell
        }
    }
}

/// Per-token trading limits. A zero resolution disables trading entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenControl {
    /// Divisor applied to imbalance increments before accumulation.
    pub min_record_resolution: U256,
    /// Cap on the net imbalance accrued within a single block.
    pub max_per_block_imbalance: U256,
    /// Cap on the running total imbalance.
    pub max_total_imbalance: U256,
}

impl Default for TokenControl {
    fn default() -> Self {
        Self {
            min_record_resolution: U256::ZERO,
            max_per_block_imbalance: U256::ZERO,
            max_total_imbalance: U256::ZERO,
        }
    }
}
