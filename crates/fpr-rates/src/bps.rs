//! # Bps Math
//!
//! Safe application of a signed basis-point delta to a fixed-point rate.

use ethnum::U256;

use crate::constants::{BPS, MAX_BPS_ADJUSTMENT, MAX_RATE, MIN_BPS_ADJUSTMENT};
use crate::errors::{RatesError, RatesResult};

/// Apply `bps` to `rate`: `rate * (10000 + bps) / 10000`, floored.
///
/// Because the numerator factor is non-negative for any legal `bps`, the
/// unsigned floor here matches truncation of the signed mathematical
/// quotient exactly.
pub fn add_bps(rate: U256, bps: i64) -> RatesResult<U256> {
    if rate > MAX_RATE {
        return Err(RatesError::OutOfBounds);
    }
    if !(MIN_BPS_ADJUSTMENT..=MAX_BPS_ADJUSTMENT).contains(&bps) {
        return Err(RatesError::OutOfBounds);
    }
    // rate <= 10^25 and the factor <= 20000, so the product stays far
    // below 2^256.
    let factor = U256::from((BPS + bps) as u64);
    Ok(rate * factor / U256::from(BPS as u64))
}
