//! KinMan expense core.
//!
//! Two pure building blocks used by the expense entry and group split flows:
//!
//! - [`ExpenseParser`] reads a free-text line (`"Dinner 500k yesterday"`) and
//!   extracts an amount, a date and the remaining description.
//! - [`allocate`] splits a total between participants, equally or with exact
//!   per-person amounts.
//!
//! Nothing here touches the clock, the network or the disk. The current date
//! is passed in by the caller.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use engine::{ExpenseParser, SplitRequest, allocate};
//! use rust_decimal::Decimal;
//!
//! let parser = ExpenseParser::new().unwrap();
//! let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let parsed = parser.parse("Dinner 500k yesterday with friends", today);
//! assert_eq!(parsed.amount, Some(Decimal::from(500_000)));
//! assert_eq!(parsed.residual_description, "Dinner with friends");
//!
//! let split = allocate(&SplitRequest::equal(Decimal::from(100), ["A", "B", "C"])).unwrap();
//! assert_eq!(split.share_of("A"), Some(Decimal::from(34)));
//! ```

pub use currency::Currency;
pub use error::{AllocationError, AmountError, CurrencyError, ParserError};
pub use money::Money;
pub use parser::{EntityKind, EntityValue, ExpenseParser, ParseResult, ParsedEntity};
pub use split::{
    Allocation, BALANCE_TOLERANCE, SplitMethod, SplitRequest, SplitShare, allocate,
};

mod currency;
mod error;
mod money;
pub mod parser;
pub mod split;
