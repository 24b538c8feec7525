//! # Rate Engine
//!
//! The external surface: token registry, role-gated configuration writes,
//! and the quote pipeline. A quote is total; every "cannot trade" outcome
//! (unlisted, disabled, expired, capped, blocked, arithmetic anomaly) is a
//! zero rate, never an error. Configuration failures reject the call
//! before any state changes.

use std::collections::HashMap;

use ethnum::{I256, U256};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bps::add_bps;
use crate::compact::CompactStore;
use crate::constants::{
    COMPACT_BPS_SCALE, COMPACT_FIELDS_PER_UNIT, DEFAULT_RATE_DURATION_BLOCKS, MAX_QTY, MAX_RATE,
    PRECISION,
};
use crate::errors::{RatesError, RatesResult};
use crate::imbalance::ImbalanceTracker;
use crate::permissions::Permissions;
use crate::steps::StepFunction;
use crate::types::{Address, TokenControl, TradeSide};

/// Registry entry for one listed token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TokenRecord {
    /// Listing order; fixes the token's compact-store position.
    token_index: usize,
    enabled: bool,
    control: Option<TokenControl>,
    base_buy: U256,
    base_sell: U256,
    /// Block of the most recent base-rate or compact write covering this
    /// token. Quotes expire a fixed number of blocks after it.
    last_update_block: u64,
    buy_steps: StepFunction,
    sell_steps: StepFunction,
}

/// Pricing engine for a fee-based pricing reserve.
///
/// Reads take `&self`, writes take `&mut self`; callers sharing the engine
/// across threads wrap it in an `RwLock`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateEngine {
    permissions: Permissions,
    tokens: HashMap<Address, TokenRecord>,
    /// Tokens in listing order.
    listed: Vec<Address>,
    compact: CompactStore,
    imbalances: ImbalanceTracker,
    valid_rate_duration_blocks: u64,
}

impl RateEngine {
    pub fn new(admin: Address) -> Self {
        Self {
            permissions: Permissions::new(admin),
            tokens: HashMap::new(),
            listed: Vec::new(),
            compact: CompactStore::new(),
            imbalances: ImbalanceTracker::new(),
            valid_rate_duration_blocks: DEFAULT_RATE_DURATION_BLOCKS,
        }
    }

    // ========================================================================
    // Listing and control (admin)
    // ========================================================================

    /// List a token, assigning it the next compact-store position. The
    /// token starts disabled and without control info.
    pub fn add_token(&mut self, caller: Address, token: Address) -> RatesResult<()> {
        self.permissions.require_admin(caller)?;
        if self.tokens.contains_key(&token) {
            return Err(RatesError::AlreadyListed);
        }
        let token_index = self.listed.len();
        self.compact.grow_for(token_index);
        self.tokens.insert(
            token,
            TokenRecord {
                token_index,
                ..TokenRecord::default()
            },
        );
        self.listed.push(token);
        debug!(%token, token_index, "token listed");
        Ok(())
    }

    pub fn set_token_control_info(
        &mut self,
        caller: Address,
        token: Address,
        min_record_resolution: U256,
        max_per_block_imbalance: U256,
        max_total_imbalance: U256,
    ) -> RatesResult<()> {
        self.permissions.require_admin(caller)?;
        let record = self.tokens.get_mut(&token).ok_or(RatesError::TokenNotListed)?;
        record.control = Some(TokenControl {
            min_record_resolution,
            max_per_block_imbalance,
            max_total_imbalance,
        });
        debug!(%token, "token control info set");
        Ok(())
    }

    /// Open the token for quoting. Control info must be configured first.
    pub fn enable_token_trade(&mut self, caller: Address, token: Address) -> RatesResult<()> {
        self.permissions.require_admin(caller)?;
        let record = self.tokens.get_mut(&token).ok_or(RatesError::TokenNotListed)?;
        if record.control.is_none() {
            return Err(RatesError::ControlInfoNotSet);
        }
        record.enabled = true;
        debug!(%token, "token trade enabled");
        Ok(())
    }

    /// Halt quoting for the token. Alerters hold this switch so a watcher
    /// can pull a token without admin involvement.
    pub fn disable_token_trade(&mut self, caller: Address, token: Address) -> RatesResult<()> {
        self.permissions.require_alerter(caller)?;
        let record = self.tokens.get_mut(&token).ok_or(RatesError::TokenNotListed)?;
        record.enabled = false;
        debug!(%token, "token trade disabled");
        Ok(())
    }

    pub fn set_valid_rate_duration_in_blocks(
        &mut self,
        caller: Address,
        blocks: u64,
    ) -> RatesResult<()> {
        self.permissions.require_admin(caller)?;
        self.valid_rate_duration_blocks = blocks;
        Ok(())
    }

    // ========================================================================
    // Rate configuration (operator)
    // ========================================================================

    /// Replace base rates for `tokens` and push compact deltas in the same
    /// call. Everything is validated before any rate changes.
    #[allow(clippy::too_many_arguments)]
    pub fn set_base_rate(
        &mut self,
        caller: Address,
        tokens: &[Address],
        buy_rates: &[U256],
        sell_rates: &[U256],
        compact_buy: &[[i8; COMPACT_FIELDS_PER_UNIT]],
        compact_sell: &[[i8; COMPACT_FIELDS_PER_UNIT]],
        block: u64,
        indices: &[usize],
    ) -> RatesResult<()> {
        self.permissions.require_operator(caller)?;
        if tokens.len() != buy_rates.len() || tokens.len() != sell_rates.len() {
            return Err(RatesError::LengthMismatch);
        }
        for token in tokens {
            if !self.tokens.contains_key(token) {
                return Err(RatesError::TokenNotListed);
            }
        }
        for rate in buy_rates.iter().chain(sell_rates) {
            if *rate > MAX_RATE {
                return Err(RatesError::OutOfBounds);
            }
        }
        self.compact.check(compact_buy, compact_sell, block, indices)?;

        for (i, token) in tokens.iter().enumerate() {
            let record = self.tokens.get_mut(token).ok_or(RatesError::TokenNotListed)?;
            record.base_buy = buy_rates[i];
            record.base_sell = sell_rates[i];
            record.last_update_block = block;
            self.imbalances.note_rate_update(*token, block);
        }
        debug!(tokens = tokens.len(), block, "base rates updated");
        self.apply_compact(compact_buy, compact_sell, block, indices)
    }

    /// Push compact deltas only. Every token in a written unit picks up
    /// `block` as its last update.
    pub fn set_compact_data(
        &mut self,
        caller: Address,
        compact_buy: &[[i8; COMPACT_FIELDS_PER_UNIT]],
        compact_sell: &[[i8; COMPACT_FIELDS_PER_UNIT]],
        block: u64,
        indices: &[usize],
    ) -> RatesResult<()> {
        self.permissions.require_operator(caller)?;
        self.apply_compact(compact_buy, compact_sell, block, indices)
    }

    fn apply_compact(
        &mut self,
        compact_buy: &[[i8; COMPACT_FIELDS_PER_UNIT]],
        compact_sell: &[[i8; COMPACT_FIELDS_PER_UNIT]],
        block: u64,
        indices: &[usize],
    ) -> RatesResult<()> {
        self.compact.set(compact_buy, compact_sell, block, indices)?;
        for record in self.tokens.values_mut() {
            let (unit, _) = CompactStore::position(record.token_index);
            if indices.contains(&unit) {
                record.last_update_block = block;
            }
        }
        debug!(units = indices.len(), block, "compact data updated");
        Ok(())
    }

    /// Replace both imbalance step functions for a token atomically.
    pub fn set_imbalance_step_function(
        &mut self,
        caller: Address,
        token: Address,
        buy_x: &[i128],
        buy_y: &[i128],
        sell_x: &[i128],
        sell_y: &[i128],
    ) -> RatesResult<()> {
        self.permissions.require_operator(caller)?;
        if !self.tokens.contains_key(&token) {
            return Err(RatesError::TokenNotListed);
        }
        let buy_steps = StepFunction::build(buy_x, buy_y)?;
        let sell_steps = StepFunction::build(sell_x, sell_y)?;
        let record = self.tokens.get_mut(&token).ok_or(RatesError::TokenNotListed)?;
        record.buy_steps = buy_steps;
        record.sell_steps = sell_steps;
        debug!(%token, "imbalance step functions updated");
        Ok(())
    }

    /// The quantity-step identifier space is retired; the call fails for
    /// any input so stale tooling gets a clear answer.
    pub fn set_quantity_step_function(
        &mut self,
        _caller: Address,
        _token: Address,
        _buy_x: &[i128],
        _buy_y: &[i128],
        _sell_x: &[i128],
        _sell_y: &[i128],
    ) -> RatesResult<()> {
        Err(RatesError::DeprecatedCommand)
    }

    // ========================================================================
    // Imbalance recording (reserve)
    // ========================================================================

    /// Record a net trade against the token's imbalance accounting. Only
    /// the configured reserve identity may call this.
    pub fn record_imbalance(
        &mut self,
        caller: Address,
        token: Address,
        qty_delta: I256,
        rate_update_block: u64,
        current_block: u64,
    ) -> RatesResult<()> {
        self.permissions.require_reserve(caller)?;
        let record = self.tokens.get(&token).ok_or(RatesError::TokenNotListed)?;
        let control = record.control.ok_or(RatesError::ControlInfoNotSet)?;
        if control.min_record_resolution == U256::ZERO {
            return Err(RatesError::ControlInfoNotSet);
        }
        self.imbalances.note_rate_update(token, rate_update_block);
        self.imbalances
            .record(token, qty_delta, control.min_record_resolution, current_block);
        debug!(%token, current_block, "imbalance recorded");
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Quote the conversion rate in precision units, or zero when no trade
    /// should happen.
    pub fn get_rate(
        &self,
        token: Address,
        current_block: u64,
        is_buy: bool,
        src_qty: U256,
    ) -> U256 {
        self.quote(token, current_block, TradeSide::from_is_buy(is_buy), src_qty)
            .unwrap_or(U256::ZERO)
    }

    fn quote(
        &self,
        token: Address,
        current_block: u64,
        side: TradeSide,
        src_qty: U256,
    ) -> Option<U256> {
        let record = self.tokens.get(&token)?;
        if !record.enabled {
            return None;
        }
        let control = record.control?;
        if control.min_record_resolution == U256::ZERO {
            return None;
        }
        if src_qty > MAX_QTY {
            return None;
        }
        let expiry = record
            .last_update_block
            .checked_add(self.valid_rate_duration_blocks)?;
        if current_block >= expiry {
            return None;
        }

        let (_, _, buy_delta, sell_delta) = self.compact.get(record.token_index);
        let (base, delta) = match side {
            TradeSide::Buy => (record.base_buy, buy_delta),
            TradeSide::Sell => (record.base_sell, sell_delta),
        };
        let rate = add_bps(base, i64::from(delta) * COMPACT_BPS_SCALE).ok()?;

        let (total, block_imbalance) =
            self.imbalances
                .read(token, control.min_record_resolution, current_block);

        // Buys push the imbalance up by the destination quantity; sells
        // pull it down by the source quantity.
        let imbalance_qty = match side {
            TradeSide::Buy => {
                let dst = src_qty.checked_mul(rate)? / PRECISION;
                I256::try_from(dst).ok()?
            }
            TradeSide::Sell => -I256::try_from(src_qty).ok()?,
        };
        let projected = total.checked_add(imbalance_qty)?;

        let step = match side {
            TradeSide::Buy => record.buy_steps.evaluate(total, projected).ok()?,
            TradeSide::Sell => record.sell_steps.evaluate(projected, total).ok()?,
        };
        let rate = add_bps(rate, step.as_bps()).ok()?;

        if projected.unsigned_abs() >= control.max_total_imbalance {
            return None;
        }
        let projected_block = block_imbalance.checked_add(imbalance_qty)?;
        if projected_block.unsigned_abs() >= control.max_per_block_imbalance {
            return None;
        }

        Some(rate)
    }

    /// Base rate for one side, before compact and step adjustments. Zero
    /// for unlisted tokens.
    pub fn get_basic_rate(&self, token: Address, is_buy: bool) -> U256 {
        self.tokens.get(&token).map_or(U256::ZERO, |r| {
            if is_buy {
                r.base_buy
            } else {
                r.base_sell
            }
        })
    }

    /// Block of the last base-rate or compact write covering the token.
    pub fn get_rate_update_block(&self, token: Address) -> u64 {
        self.tokens.get(&token).map_or(0, |r| r.last_update_block)
    }

    /// `(listed, enabled)` flags.
    pub fn get_token_basic_data(&self, token: Address) -> (bool, bool) {
        self.tokens
            .get(&token)
            .map_or((false, false), |r| (true, r.enabled))
    }

    /// Tokens in listing order.
    pub fn get_listed_tokens(&self) -> Vec<Address> {
        self.listed.clone()
    }

    /// Compact-store position and current deltas for a token.
    pub fn get_compact_data(&self, token: Address) -> RatesResult<(usize, usize, i8, i8)> {
        let record = self.tokens.get(&token).ok_or(RatesError::TokenNotListed)?;
        Ok(self.compact.get(record.token_index))
    }

    /// Total and current-block imbalance in token units. `current_block`
    /// zero reads the per-block figure raw.
    pub fn get_imbalance_per_token(
        &self,
        token: Address,
        current_block: u64,
    ) -> RatesResult<(I256, I256)> {
        let record = self.tokens.get(&token).ok_or(RatesError::TokenNotListed)?;
        let resolution = record
            .control
            .map_or(U256::ZERO, |c| c.min_record_resolution);
        Ok(self.imbalances.read(token, resolution, current_block))
    }

    /// Step-function introspection keyed by command id. Ids 8 through 15
    /// select buy/sell X-length, X-value, Y-length, Y-value; 0 through 7
    /// belonged to the retired quantity-step space and fail distinctly.
    pub fn get_step_function_data(
        &self,
        token: Address,
        command_id: u32,
        param_index: usize,
    ) -> RatesResult<i128> {
        let record = self.tokens.get(&token).ok_or(RatesError::TokenNotListed)?;
        match command_id {
            0..=7 => Err(RatesError::DeprecatedCommand),
            8 => Ok(record.buy_steps.x_len() as i128),
            9 => record.buy_steps.x_at(param_index),
            10 => Ok(record.buy_steps.y_len() as i128),
            11 => record.buy_steps.y_at(param_index),
            12 => Ok(record.sell_steps.x_len() as i128),
            13 => record.sell_steps.x_at(param_index),
            14 => Ok(record.sell_steps.y_len() as i128),
            15 => record.sell_steps.y_at(param_index),
            _ => Err(RatesError::UnknownCommand),
        }
    }

    // ========================================================================
    // Role management (delegated)
    // ========================================================================

    pub fn admin(&self) -> Address {
        self.permissions.admin()
    }

    pub fn transfer_admin(&mut self, caller: Address, new_admin: Address) -> RatesResult<()> {
        self.permissions.transfer_admin(caller, new_admin)
    }

    pub fn add_operator(&mut self, caller: Address, operator: Address) -> RatesResult<()> {
        self.permissions.add_operator(caller, operator)
    }

    pub fn remove_operator(&mut self, caller: Address, operator: Address) -> RatesResult<()> {
        self.permissions.remove_operator(caller, operator)
    }

    pub fn add_alerter(&mut self, caller: Address, alerter: Address) -> RatesResult<()> {
        self.permissions.add_alerter(caller, alerter)
    }

    pub fn remove_alerter(&mut self, caller: Address, alerter: Address) -> RatesResult<()> {
        self.permissions.remove_alerter(caller, alerter)
    }

    pub fn set_reserve(&mut self, caller: Address, reserve: Address) -> RatesResult<()> {
        self.permissions.set_reserve(caller, reserve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_RATE_DURATION_BLOCKS;

    const ADMIN: Address = Address([1u8; 20]);
    const OPERATOR: Address = Address([2u8; 20]);
    const ALERTER: Address = Address([3u8; 20]);
    const RESERVE: Address = Address([4u8; 20]);
    const TOKEN: Address = Address([9u8; 20]);

    fn engine_with_roles() -> RateEngine {
        let mut engine = RateEngine::new(ADMIN);
        engine.add_operator(ADMIN, OPERATOR).unwrap();
        engine.add_alerter(ADMIN, ALERTER).unwrap();
        engine.set_reserve(ADMIN, RESERVE).unwrap();
        engine
    }

    fn listed_engine() -> RateEngine {
        let mut engine = engine_with_roles();
        engine.add_token(ADMIN, TOKEN).unwrap();
        engine
            .set_token_control_info(
                ADMIN,
                TOKEN,
                U256::ONE,
                U256::from(1_000_000u64),
                U256::from(10_000_000u64),
            )
            .unwrap();
        engine.enable_token_trade(ADMIN, TOKEN).unwrap();
        engine
    }

    fn set_base(engine: &mut RateEngine, buy: U256, sell: U256, block: u64) {
        engine
            .set_base_rate(OPERATOR, &[TOKEN], &[buy], &[sell], &[], &[], block, &[])
            .unwrap();
    }

    #[test]
    fn listing_is_admin_gated_and_unique() {
        let mut engine = engine_with_roles();
        assert_eq!(
            engine.add_token(OPERATOR, TOKEN),
            Err(RatesError::Unauthorized)
        );
        engine.add_token(ADMIN, TOKEN).unwrap();
        assert_eq!(engine.add_token(ADMIN, TOKEN), Err(RatesError::AlreadyListed));
        assert_eq!(engine.get_listed_tokens(), vec![TOKEN]);
        assert_eq!(engine.get_token_basic_data(TOKEN), (true, false));
    }

    #[test]
    fn enable_needs_control_info() {
        let mut engine = engine_with_roles();
        engine.add_token(ADMIN, TOKEN).unwrap();
        assert_eq!(
            engine.enable_token_trade(ADMIN, TOKEN),
            Err(RatesError::ControlInfoNotSet)
        );
        engine
            .set_token_control_info(ADMIN, TOKEN, U256::ONE, U256::ONE, U256::ONE)
            .unwrap();
        engine.enable_token_trade(ADMIN, TOKEN).unwrap();
        assert_eq!(engine.get_token_basic_data(TOKEN), (true, true));
    }

    #[test]
    fn disable_is_alerter_gated() {
        let mut engine = listed_engine();
        assert_eq!(
            engine.disable_token_trade(ADMIN, TOKEN),
            Err(RatesError::Unauthorized)
        );
        engine.disable_token_trade(ALERTER, TOKEN).unwrap();
        assert_eq!(engine.get_token_basic_data(TOKEN), (true, false));
    }

    #[test]
    fn base_rate_round_trips_through_quote() {
        let mut engine = listed_engine();
        let buy = PRECISION * U256::from(2u64);
        let sell = PRECISION / U256::from(2u64);
        set_base(&mut engine, buy, sell, 100);

        assert_eq!(engine.get_basic_rate(TOKEN, true), buy);
        assert_eq!(engine.get_basic_rate(TOKEN, false), sell);
        assert_eq!(engine.get_rate_update_block(TOKEN), 100);
        assert_eq!(engine.get_rate(TOKEN, 100, true, U256::from(1000u64)), buy);
        assert_eq!(engine.get_rate(TOKEN, 100, false, U256::from(1000u64)), sell);
    }

    #[test]
    fn quotes_expire_after_the_duration() {
        let mut engine = listed_engine();
        set_base(&mut engine, PRECISION, PRECISION, 100);

        let last_valid = 100 + DEFAULT_RATE_DURATION_BLOCKS - 1;
        assert_ne!(
            engine.get_rate(TOKEN, last_valid, true, U256::ONE),
            U256::ZERO
        );
        assert_eq!(
            engine.get_rate(TOKEN, last_valid + 1, true, U256::ONE),
            U256::ZERO
        );

        // A longer validity window revives the quote.
        engine
            .set_valid_rate_duration_in_blocks(ADMIN, DEFAULT_RATE_DURATION_BLOCKS + 10)
            .unwrap();
        assert_ne!(
            engine.get_rate(TOKEN, last_valid + 1, true, U256::ONE),
            U256::ZERO
        );
    }

    #[test]
    fn oversize_quantity_quotes_zero() {
        let mut engine = listed_engine();
        set_base(&mut engine, PRECISION, PRECISION, 100);
        // Caps wide enough that only the quantity check can zero the quote.
        engine
            .set_token_control_info(
                ADMIN,
                TOKEN,
                U256::ONE,
                U256::new(10u128.pow(29)),
                U256::new(10u128.pow(29)),
            )
            .unwrap();
        assert_ne!(engine.get_rate(TOKEN, 100, true, MAX_QTY), U256::ZERO);
        assert_eq!(
            engine.get_rate(TOKEN, 100, true, MAX_QTY + U256::ONE),
            U256::ZERO
        );
    }

    #[test]
    fn zero_resolution_quotes_zero() {
        let mut engine = listed_engine();
        set_base(&mut engine, PRECISION, PRECISION, 100);
        engine
            .set_token_control_info(ADMIN, TOKEN, U256::ZERO, U256::ONE, U256::ONE)
            .unwrap();
        assert_eq!(engine.get_rate(TOKEN, 100, true, U256::ONE), U256::ZERO);
    }

    #[test]
    fn base_rate_rejects_bad_batches_atomically() {
        let mut engine = listed_engine();
        set_base(&mut engine, PRECISION, PRECISION, 100);

        let other = Address([8u8; 20]);
        assert_eq!(
            engine.set_base_rate(
                OPERATOR,
                &[TOKEN, other],
                &[PRECISION, PRECISION],
                &[PRECISION, PRECISION],
                &[],
                &[],
                200,
                &[]
            ),
            Err(RatesError::TokenNotListed)
        );
        assert_eq!(
            engine.set_base_rate(
                OPERATOR,
                &[TOKEN],
                &[MAX_RATE + U256::ONE],
                &[PRECISION],
                &[],
                &[],
                200,
                &[]
            ),
            Err(RatesError::OutOfBounds)
        );
        assert_eq!(
            engine.set_base_rate(OPERATOR, &[TOKEN], &[PRECISION], &[], &[], &[], 200, &[]),
            Err(RatesError::LengthMismatch)
        );
        // nothing moved
        assert_eq!(engine.get_rate_update_block(TOKEN), 100);
        assert_eq!(engine.get_basic_rate(TOKEN, true), PRECISION);
    }

    #[test]
    fn step_function_commands_dispatch() {
        let mut engine = listed_engine();
        engine
            .set_imbalance_step_function(
                OPERATOR,
                TOKEN,
                &[-100, 100],
                &[10, 0, -20],
                &[-50],
                &[5, -5],
            )
            .unwrap();

        assert_eq!(engine.get_step_function_data(TOKEN, 8, 0).unwrap(), 2);
        assert_eq!(engine.get_step_function_data(TOKEN, 9, 0).unwrap(), -100);
        assert_eq!(engine.get_step_function_data(TOKEN, 9, 1).unwrap(), 100);
        assert_eq!(engine.get_step_function_data(TOKEN, 10, 0).unwrap(), 3);
        assert_eq!(engine.get_step_function_data(TOKEN, 11, 2).unwrap(), -20);
        assert_eq!(engine.get_step_function_data(TOKEN, 12, 0).unwrap(), 1);
        assert_eq!(engine.get_step_function_data(TOKEN, 13, 0).unwrap(), -50);
        assert_eq!(engine.get_step_function_data(TOKEN, 14, 0).unwrap(), 2);
        assert_eq!(engine.get_step_function_data(TOKEN, 15, 1).unwrap(), -5);

        for id in 0..8 {
            assert_eq!(
                engine.get_step_function_data(TOKEN, id, 0),
                Err(RatesError::DeprecatedCommand)
            );
        }
        assert_eq!(
            engine.get_step_function_data(TOKEN, 16, 0),
            Err(RatesError::UnknownCommand)
        );
        assert_eq!(
            engine.get_step_function_data(TOKEN, 9, 2),
            Err(RatesError::OutOfBounds)
        );
    }

    #[test]
    fn quantity_step_function_is_retired() {
        let mut engine = listed_engine();
        assert_eq!(
            engine.set_quantity_step_function(OPERATOR, TOKEN, &[], &[0], &[], &[0]),
            Err(RatesError::DeprecatedCommand)
        );
    }

    #[test]
    fn recording_is_reserve_gated() {
        let mut engine = listed_engine();
        assert_eq!(
            engine.record_imbalance(OPERATOR, TOKEN, I256::new(10), 0, 50),
            Err(RatesError::Unauthorized)
        );
        engine
            .record_imbalance(RESERVE, TOKEN, I256::new(10), 0, 50)
            .unwrap();
        assert_eq!(
            engine.get_imbalance_per_token(TOKEN, 50).unwrap(),
            (I256::new(10), I256::new(10))
        );
    }
}
