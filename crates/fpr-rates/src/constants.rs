//! # Engine Constants
//!
//! Fixed-point precision, legal bounds, and the packing geometry shared by
//! every component of the pricing engine.

use ethnum::{I256, U256};

// ============================================================================
// Fixed-point precision
// ============================================================================

/// Rate precision unit: rates carry 18 decimals.
pub const PRECISION: U256 = U256::new(1_000_000_000_000_000_000);

/// Highest legal rate, in precision units (10^25).
pub const MAX_RATE: U256 = U256::new(10_000_000_000_000_000_000_000_000);

/// Highest quantity a quote may be requested for (10^28).
pub const MAX_QTY: U256 = U256::new(10_000_000_000_000_000_000_000_000_000);

// ============================================================================
// Basis points
// ============================================================================

/// Basis-point denominator (10,000 = 100%).
pub const BPS: i64 = 10_000;

/// Largest legal bps adjustment (+100%).
pub const MAX_BPS_ADJUSTMENT: i64 = 10_000;

/// Smallest legal bps adjustment (-100%). Doubles as the "trade blocked"
/// sentinel inside step functions.
pub const MIN_BPS_ADJUSTMENT: i64 = -10_000;

/// One compact-data unit moves the rate by this many bps.
pub const COMPACT_BPS_SCALE: i64 = 10;

// ============================================================================
// Storage geometry
// ============================================================================

/// Tokens packed into one compact storage unit.
pub const COMPACT_FIELDS_PER_UNIT: usize = 14;

/// Maximum stored entries per step function: 15 explicit breakpoints plus
/// the implicit tail segment.
pub const MAX_STEPS: usize = 16;

/// Compact-data block numbers must fit in 32 bits.
pub const MAX_BLOCK: u64 = 0xFFFF_FFFF;

/// Rates expire this many blocks after the last compact write unless
/// reconfigured.
pub const DEFAULT_RATE_DURATION_BLOCKS: u64 = 10;

// ============================================================================
// Imbalance domain
// ============================================================================

/// Overflow sentinel for imbalance accounting: 2^255 - 1.
pub const MAX_IMBALANCE: I256 = I256::MAX;

/// Reserved breakpoint value (2^127 - 1). It decodes to [`MAX_IMBALANCE`]
/// and marks the implicit tail segment of a stored step function.
pub const STEP_X_SENTINEL: i128 = i128::MAX;
