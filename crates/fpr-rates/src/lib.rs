//! # FPR Rates - Compact Rate & Step-Function Pricing
//!
//! Pricing engine for a fee-based pricing reserve (FPR). It provides:
//!
//! - Base conversion rates with compact per-block bps offsets, packed
//!   fourteen tokens to a storage unit
//! - Imbalance step functions evaluated as quantity-weighted averages,
//!   with a signed 128-bit-pair codec and a blocking sentinel
//! - Resolution-scaled net-trade imbalance accounting with per-block and
//!   total caps
//! - A role-gated configuration surface (admin, operators, alerters, and
//!   a single recording reserve)
//!
//! Quoting is total: [`RateEngine::get_rate`] returns zero for every
//! "cannot trade" outcome and never errors. Configuration writes are
//! atomic and validated up front.

pub mod bps;
pub mod compact;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod imbalance;
pub mod permissions;
pub mod step_codec;
pub mod steps;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use engine::RateEngine;
pub use errors::{RatesError, RatesResult};
pub use imbalance::{ImbalanceRecord, ImbalanceTracker};
pub use permissions::Permissions;
pub use steps::{StepFunction, StepResult};
pub use types::{Address, TokenControl, TradeSide};
