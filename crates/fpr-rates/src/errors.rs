//! # Error Types
//!
//! One taxonomy for the whole engine. Configuration and authorization
//! failures always reject the call before any state is touched; an
//! unavailable quote is never an error, it is a zero rate.

use thiserror::Error;

/// Errors surfaced by configuration, encoding, and query paths.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatesError {
    // ========================================================================
    // Numeric bounds
    // ========================================================================
    #[error("value out of bounds")]
    OutOfBounds,

    #[error("step coordinate magnitude exceeds 127 bits")]
    EncodeOverflow,

    // ========================================================================
    // Configuration
    // ========================================================================
    #[error("input array lengths do not match")]
    LengthMismatch,

    #[error("too many steps in function")]
    TooManySteps,

    #[error("step breakpoints must be strictly increasing")]
    NotIncreasing,

    #[error("bps adjustment outside [-10000, 10000]")]
    BpsOutOfRange,

    #[error("duplicate compact unit index in one update")]
    DuplicateUnitIndex,

    #[error("block number does not fit in 32 bits")]
    BlockOutOfRange,

    #[error("token is not listed")]
    TokenNotListed,

    #[error("token is already listed")]
    AlreadyListed,

    #[error("token control info not set")]
    ControlInfoNotSet,

    // ========================================================================
    // Command dispatch
    // ========================================================================
    #[error("command id belongs to the retired quantity-step space")]
    DeprecatedCommand,

    #[error("unknown command id")]
    UnknownCommand,

    // ========================================================================
    // Authorization
    // ========================================================================
    #[error("caller lacks the required role")]
    Unauthorized,
}

/// Result type using engine errors.
pub type RatesResult<T> = Result<T, RatesError>;
