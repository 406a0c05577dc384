use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::{AmountError, Currency};

/// A monetary amount in a given currency.
///
/// Amounts are exact decimals (`rust_decimal`), never floats, so sums of
/// split shares stay equal to the total without drift.
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
/// use rust_decimal::Decimal;
///
/// let amount = Money::new(Decimal::from(50_000), Currency::Vnd);
/// assert_eq!(amount.to_string(), "50.000 ₫");
///
/// let amount = Money::parse("1234,5", Currency::Usd).unwrap();
/// assert_eq!(amount.to_string(), "$1,234.50");
/// ```
///
/// Parsing from user input accepts `.` or `,` as decimal separator and rejects
/// more fraction digits than the currency has:
///
/// ```rust
/// use engine::{Currency, Money};
///
/// assert!(Money::parse("12.345", Currency::Usd).is_err());
/// assert!(Money::parse("500.5", Currency::Vnd).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency: Currency,
}

impl Money {
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Parses a user typed amount in major units.
    ///
    /// Accepts an optional leading `+`/`-`, and `.` or `,` as decimal
    /// separator. Grouping separators are not accepted.
    pub fn parse(input: &str, currency: Currency) -> Result<Self, AmountError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped.trim_start())
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped.trim_start())
        } else {
            (false, trimmed)
        };
        if rest.is_empty() {
            return Err(AmountError::Empty);
        }

        let amount =
            parse_decimal(rest).ok_or_else(|| AmountError::Invalid(trimmed.to_string()))?;
        if amount.scale() > currency.minor_units() {
            return Err(AmountError::TooManyDecimals {
                currency: currency.code(),
                input: trimmed.to_string(),
            });
        }

        let amount = if negative { -amount } else { amount };
        Ok(Self { amount, currency })
    }
}

/// Converts a plain number with `.` or `,` as decimal separator.
///
/// Only ASCII digits with at most one separator are accepted; `1.5` and `1,5`
/// are the same value.
pub(crate) fn parse_decimal(raw: &str) -> Option<Decimal> {
    let normalized = raw.replace(',', ".");
    let mut parts = normalized.split('.');
    let int_part = parts.next()?;
    let frac_part = parts.next();
    if parts.next().is_some() {
        return None;
    }
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Some(frac) = frac_part
        && (frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }
    normalized.parse::<Decimal>().ok().map(|d| d.normalize())
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Money {
    /// Locale display: `50.000 ₫` for VND, `$1,234.50` for USD.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.currency.minor_units();
        let (thousands, decimal) = self.currency.separators();

        let mut abs = self
            .amount
            .abs()
            .round_dp_with_strategy(units, RoundingStrategy::MidpointAwayFromZero);
        abs.rescale(units);
        let rendered = abs.to_string();
        let (int_part, frac_part) = match rendered.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (rendered.as_str(), None),
        };

        let mut number = group_digits(int_part, thousands);
        if let Some(frac) = frac_part {
            number.push(decimal);
            number.push_str(frac);
        }

        let sign = if self.amount.is_sign_negative() && !abs.is_zero() {
            "-"
        } else {
            ""
        };
        match self.currency {
            Currency::Vnd => write!(f, "{sign}{number} {}", self.currency.symbol()),
            Currency::Usd => write!(f, "{sign}{}{number}", self.currency.symbol()),
        }
    }
}
