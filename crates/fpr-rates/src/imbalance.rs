//! # Imbalance Tracking
//!
//! Running net-trade accounting per token. Increments are scaled down by
//! the token's recording resolution before storage and scaled back up on
//! read, so the tracker holds coarse units internally. Totals saturate at
//! [`MAX_IMBALANCE`] instead of wrapping.

use std::collections::HashMap;

use ethnum::{I256, U256};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::MAX_IMBALANCE;
use crate::types::Address;

/// Per-token accumulator, in resolution units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImbalanceRecord {
    /// Net imbalance since listing.
    pub total: I256,
    /// Net imbalance accrued within `last_block`.
    pub last_block_imbalance: I256,
    /// Block of the most recent recording.
    pub last_block: u64,
    /// Block of the most recent base-rate update affecting this token.
    pub last_rate_update_block: u64,
}

impl Default for ImbalanceRecord {
    fn default() -> Self {
        Self {
            total: I256::ZERO,
            last_block_imbalance: I256::ZERO,
            last_block: 0,
            last_rate_update_block: 0,
        }
    }
}

/// Tracker keyed by token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImbalanceTracker {
    records: HashMap<Address, ImbalanceRecord>,
}

/// Narrow an unsigned resolution into the signed domain, saturating at
/// the positive extreme.
pub(crate) fn i256_from_u256(value: U256) -> I256 {
    I256::try_from(value).unwrap_or(I256::MAX)
}

fn clamped_add(token: Address, lhs: I256, rhs: I256) -> I256 {
    lhs.checked_add(rhs).unwrap_or_else(|| {
        warn!(%token, "imbalance accumulator saturated");
        MAX_IMBALANCE
    })
}

impl ImbalanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a net trade of `delta` tokens at `block`. The increment is
    /// divided by `resolution` (truncating toward zero) before it is
    /// accumulated; a new block resets the per-block accumulator first.
    pub fn record(&mut self, token: Address, delta: I256, resolution: U256, block: u64) {
        let entry = self.records.entry(token).or_default();
        if entry.last_block != block {
            entry.last_block = block;
            entry.last_block_imbalance = I256::ZERO;
        }
        let scaled = if resolution == U256::ZERO {
            delta
        } else {
            delta / i256_from_u256(resolution)
        };
        entry.total = clamped_add(token, entry.total, scaled);
        entry.last_block_imbalance = clamped_add(token, entry.last_block_imbalance, scaled);
    }

    /// Stamp the block of a base-rate update covering `token`.
    pub fn note_rate_update(&mut self, token: Address, block: u64) {
        self.records.entry(token).or_default().last_rate_update_block = block;
    }

    /// Total and current-block imbalance in token units, scaled back up by
    /// `resolution`. With `current_block` zero the per-block figure is
    /// returned raw regardless of when it was recorded; otherwise a stale
    /// record reads as zero. Scale-up overflow saturates at
    /// [`MAX_IMBALANCE`].
    pub fn read(
        &self,
        token: Address,
        resolution: U256,
        current_block: u64,
    ) -> (I256, I256) {
        let record = self.records.get(&token).copied().unwrap_or_default();
        let block_imbalance = if current_block == 0 || record.last_block == current_block {
            record.last_block_imbalance
        } else {
            I256::ZERO
        };
        (
            scale_up(record.total, resolution),
            scale_up(block_imbalance, resolution),
        )
    }

    /// Raw record, without scaling. Missing tokens read as all-zero.
    pub fn raw(&self, token: Address) -> ImbalanceRecord {
        self.records.get(&token).copied().unwrap_or_default()
    }

    /// Block of the most recent base-rate update covering `token`.
    pub fn rate_update_block(&self, token: Address) -> u64 {
        self.records
            .get(&token)
            .map_or(0, |r| r.last_rate_update_block)
    }

    /// Drop all accounting for `token`.
    pub fn remove(&mut self, token: Address) {
        self.records.remove(&token);
    }
}

fn scale_up(value: I256, resolution: U256) -> I256 {
    if resolution == U256::ZERO {
        return value;
    }
    value
        .checked_mul(i256_from_u256(resolution))
        .unwrap_or(MAX_IMBALANCE)
}
