//! # Compact Store
//!
//! Per-block bps offsets for many tokens, grouped fourteen to a unit so
//! one configuration push can retouch a whole batch. The packing is an
//! array of small structs here, but the addressing function
//! `(token_index / 14, token_index % 14)` is load-bearing and preserved
//! exactly.

use serde::{Deserialize, Serialize};

use crate::constants::{COMPACT_FIELDS_PER_UNIT, MAX_BLOCK};
use crate::errors::{RatesError, RatesResult};

/// One storage unit: signed deltas for fourteen tokens on each side, plus
/// the block of the last write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactUnit {
    pub buy: [i8; COMPACT_FIELDS_PER_UNIT],
    pub sell: [i8; COMPACT_FIELDS_PER_UNIT],
    pub block: u64,
}

impl Default for CompactUnit {
    fn default() -> Self {
        Self {
            buy: [0; COMPACT_FIELDS_PER_UNIT],
            sell: [0; COMPACT_FIELDS_PER_UNIT],
            block: 0,
        }
    }
}

/// Dense store addressed by `(token_index / 14, token_index % 14)`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompactStore {
    units: Vec<CompactUnit>,
}

impl CompactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of allocated units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Position of a token within the store.
    pub fn position(token_index: usize) -> (usize, usize) {
        (
            token_index / COMPACT_FIELDS_PER_UNIT,
            token_index % COMPACT_FIELDS_PER_UNIT,
        )
    }

    /// Make room for a newly listed token; the token opening a fresh unit
    /// appends it.
    pub fn grow_for(&mut self, token_index: usize) {
        let (unit, _) = Self::position(token_index);
        if unit >= self.units.len() {
            self.units.resize_with(unit + 1, CompactUnit::default);
        }
    }

    /// Validate a batch write without touching state.
    pub fn check(
        &self,
        buy: &[[i8; COMPACT_FIELDS_PER_UNIT]],
        sell: &[[i8; COMPACT_FIELDS_PER_UNIT]],
        block: u64,
        indices: &[usize],
    ) -> RatesResult<()> {
        if buy.len() != sell.len() || buy.len() != indices.len() {
            return Err(RatesError::LengthMismatch);
        }
        if block > MAX_BLOCK {
            return Err(RatesError::BlockOutOfRange);
        }
        for (i, &idx) in indices.iter().enumerate() {
            if idx >= self.units.len() {
                return Err(RatesError::OutOfBounds);
            }
            if indices[..i].contains(&idx) {
                return Err(RatesError::DuplicateUnitIndex);
            }
        }
        Ok(())
    }

    /// Overwrite whole units with fresh deltas and stamp each with `block`.
    /// All validation happens before any unit changes.
    pub fn set(
        &mut self,
        buy: &[[i8; COMPACT_FIELDS_PER_UNIT]],
        sell: &[[i8; COMPACT_FIELDS_PER_UNIT]],
        block: u64,
        indices: &[usize],
    ) -> RatesResult<()> {
        self.check(buy, sell, block, indices)?;
        for (i, &idx) in indices.iter().enumerate() {
            self.units[idx] = CompactUnit {
                buy: buy[i],
                sell: sell[i],
                block,
            };
        }
        Ok(())
    }

    /// Position and current deltas for one token.
    pub fn get(&self, token_index: usize) -> (usize, usize, i8, i8) {
        let (unit, field) = Self::position(token_index);
        let entry = self.units.get(unit).copied().unwrap_or_default();
        (unit, field, entry.buy[field], entry.sell[field])
    }

    /// Block of the last write covering `token_index`.
    pub fn block_of(&self, token_index: usize) -> u64 {
        let (unit, _) = Self::position(token_index);
        self.units.get(unit).map_or(0, |u| u.block)
    }
}
