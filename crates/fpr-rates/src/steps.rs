//! # Step Functions
//!
//! Piecewise tables mapping a signed imbalance range to a bps adjustment.
//! A function is an ordered list of breakpoints `x0 < x1 < ... < x(n-1)`
//! with one value per segment (n + 1 values in total); evaluation returns
//! the quantity-weighted average of the values applicable across
//! `[from, to)`. A reachable segment valued at exactly -10000 refuses the
//! whole range, not just its share of it.

use ethnum::{I256, U256};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_BPS_ADJUSTMENT, MAX_STEPS, MIN_BPS_ADJUSTMENT, STEP_X_SENTINEL};
use crate::errors::{RatesError, RatesResult};
use crate::step_codec;

const BLOCK_SENTINEL: I256 = I256::new(MIN_BPS_ADJUSTMENT as i128);

/// Outcome of a step-function evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Weighted-average bps adjustment for the range.
    Bps(i64),
    /// Some reachable segment carries the -10000 sentinel; the trade is
    /// refused outright.
    Blocked,
}

impl StepResult {
    /// Numeric form used at the external boundary.
    pub fn as_bps(self) -> i64 {
        match self {
            StepResult::Bps(value) => value,
            StepResult::Blocked => MIN_BPS_ADJUSTMENT,
        }
    }
}

/// One side's breakpoint table, stored as codec words. The final word
/// carries the reserved sentinel breakpoint, which decodes to the maximum
/// imbalance, so the implicit tail segment walks like any other step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFunction {
    data: Vec<U256>,
}

impl StepFunction {
    /// Validate and encode a breakpoint table.
    pub fn build(xs: &[i128], ys: &[i128]) -> RatesResult<Self> {
        if ys.len() != xs.len() + 1 {
            return Err(RatesError::LengthMismatch);
        }
        if ys.len() > MAX_STEPS {
            return Err(RatesError::TooManySteps);
        }
        for pair in xs.windows(2) {
            if pair[0] >= pair[1] {
                return Err(RatesError::NotIncreasing);
            }
        }
        for &x in xs {
            // 2^127 - 1 is reserved for the tail segment.
            if x == STEP_X_SENTINEL {
                return Err(RatesError::OutOfBounds);
            }
        }
        for &y in ys {
            if y < MIN_BPS_ADJUSTMENT as i128 || y > MAX_BPS_ADJUSTMENT as i128 {
                return Err(RatesError::BpsOutOfRange);
            }
        }

        let mut data = Vec::with_capacity(ys.len());
        for (i, &y) in ys.iter().enumerate() {
            let x = if i < xs.len() { xs[i] } else { STEP_X_SENTINEL };
            data.push(step_codec::encode(I256::new(x), I256::new(y))?);
        }
        Ok(Self { data })
    }

    /// Number of explicit breakpoints.
    pub fn x_len(&self) -> usize {
        self.data.len().saturating_sub(1)
    }

    /// Number of segment values, one more than the breakpoints.
    pub fn y_len(&self) -> usize {
        self.data.len()
    }

    /// Breakpoint `i`. The stored tail sentinel is not addressable here.
    pub fn x_at(&self, i: usize) -> RatesResult<i128> {
        if i >= self.x_len() {
            return Err(RatesError::OutOfBounds);
        }
        let (x, _) = step_codec::decode(self.data[i]);
        Ok(x.as_i128())
    }

    /// Segment value `i`.
    pub fn y_at(&self, i: usize) -> RatesResult<i128> {
        if i >= self.y_len() {
            return Err(RatesError::OutOfBounds);
        }
        let (_, y) = step_codec::decode(self.data[i]);
        Ok(y.as_i128())
    }

    /// Quantity-weighted average bps across `[from, to)`.
    ///
    /// Breakpoints at or below `from` contribute nothing. Each remaining
    /// segment contributes `(min(x, to) - from) * y`; the result is the
    /// accumulated change divided by `to - from`, truncating toward zero.
    pub fn evaluate(&self, from: I256, to: I256) -> RatesResult<StepResult> {
        if self.data.is_empty() || from == to {
            return Ok(StepResult::Bps(0));
        }
        let qty = to.checked_sub(from).ok_or(RatesError::OutOfBounds)?;

        let mut from = from;
        let mut change = I256::ZERO;
        for &word in &self.data {
            let (x, y) = step_codec::decode(word);
            if x <= from {
                continue;
            }
            if y == BLOCK_SENTINEL {
                return Ok(StepResult::Blocked);
            }
            let upper = if x >= to { to } else { x };
            let span = upper.checked_sub(from).ok_or(RatesError::OutOfBounds)?;
            let weighted = span.checked_mul(y).ok_or(RatesError::OutOfBounds)?;
            change = change.checked_add(weighted).ok_or(RatesError::OutOfBounds)?;
            from = upper;
            if from == to {
                break;
            }
        }

        // The weighted average of values in [-10000, 10000] fits i64.
        Ok(StepResult::Bps((change / qty).as_i64()))
    }

    /// Adjustment for buying `qty` on top of the current imbalance.
    pub fn evaluate_buy(&self, current: I256, qty: I256) -> RatesResult<StepResult> {
        let to = current.checked_add(qty).ok_or(RatesError::OutOfBounds)?;
        self.evaluate(current, to)
    }

    /// Adjustment for selling `qty` against the current imbalance.
    pub fn evaluate_sell(&self, current: I256, qty: I256) -> RatesResult<StepResult> {
        let from = current.checked_sub(qty).ok_or(RatesError::OutOfBounds)?;
        self.evaluate(from, current)
    }
}
