//! # Step Codec
//!
//! Packs one signed `(x, y)` step-function breakpoint into a single
//! 256-bit word: x in the high 128 bits, y in the low, both
//! two's-complement. The x value `2^127 - 1` is reserved: it marks the
//! implicit tail segment and decodes to the maximum imbalance.

use ethnum::{I256, U256};

use crate::constants::{MAX_IMBALANCE, STEP_X_SENTINEL};
use crate::errors::{RatesError, RatesResult};

const HALF_MIN: I256 = I256::new(i128::MIN);
const HALF_MAX: I256 = I256::new(i128::MAX);

fn fits_half(value: I256) -> bool {
    value > HALF_MIN && value <= HALF_MAX
}

/// Pack `(x, y)` into one word. Fails with [`RatesError::EncodeOverflow`]
/// unless both values lie strictly inside `(-2^127, 2^127)`.
pub fn encode(x: I256, y: I256) -> RatesResult<U256> {
    if !fits_half(x) || !fits_half(y) {
        return Err(RatesError::EncodeOverflow);
    }
    let x_bits = x.into_words().1 as u128;
    let y_bits = y.into_words().1 as u128;
    Ok(U256::from_words(x_bits, y_bits))
}

/// Unpack a word produced by [`encode`]. An x equal to the reserved
/// sentinel reads back as [`MAX_IMBALANCE`].
pub fn decode(word: U256) -> (I256, I256) {
    let (hi, lo) = word.into_words();
    let x_raw = hi as i128;
    let y = I256::new(lo as i128);
    let x = if x_raw == STEP_X_SENTINEL {
        MAX_IMBALANCE
    } else {
        I256::new(x_raw)
    };
    (x, y)
}
