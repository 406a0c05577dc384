//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`AllocationError`] returned by [`allocate`] when a split request is
//!   malformed. An exact split that does not add up is *not* an error.
//! - [`ParserError`] returned when the recognizer tables cannot be compiled.
//! - [`AmountError`] returned when user supplied amount text is invalid.
//! - [`CurrencyError`] returned for unknown currency codes.
//!
//!  [`allocate`]: crate::split::allocate
use rust_decimal::Decimal;
use thiserror::Error;

/// Split validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("no participants to split between")]
    NoParticipants,
    #[error("invalid amount: {0} (must be > 0)")]
    InvalidAmount(Decimal),
    #[error("\"{0}\" is listed more than once")]
    DuplicateParticipant(String),
    #[error("\"{0}\" is not a participant of this split")]
    UnknownParticipant(String),
    #[error("split amounts are too large to add up")]
    Overflow,
}

/// Failure building an [`ExpenseParser`](crate::ExpenseParser).
#[derive(Error, Debug)]
pub enum ParserError {
    #[error("invalid recognizer pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Invalid amount text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount: {0}")]
    Invalid(String),
    #[error("too many decimals for {currency}: {input}")]
    TooManyDecimals {
        currency: &'static str,
        input: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported currency: {0}")]
pub struct CurrencyError(pub String);
