use serde::{Deserialize, Serialize};

use crate::CurrencyError;

/// ISO currency code used to display and validate money values.
///
/// KinMan books in Vietnamese dong by default. Amounts are carried as exact
/// decimals (see [`Money`](crate::Money)); the currency only decides how many
/// fraction digits are meaningful and how a value is shown to the user.
///
/// ## Minor units
///
/// `minor_units()` returns how many decimal digits the smallest unit has:
/// - VND has none, so `50000` is fifty thousand dong and `50000.5` is invalid
///   user input
/// - USD has 2 (cents)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Vnd,
    Usd,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Vnd => "VND",
            Currency::Usd => "USD",
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Vnd => "₫",
            Currency::Usd => "$",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    #[must_use]
    pub const fn minor_units(self) -> u32 {
        match self {
            Currency::Vnd => 0,
            Currency::Usd => 2,
        }
    }

    /// Thousands and decimal separators for locale display.
    pub(crate) const fn separators(self) -> (char, char) {
        match self {
            Currency::Vnd => ('.', ','),
            Currency::Usd => (',', '.'),
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = CurrencyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "VND" => Ok(Currency::Vnd),
            "USD" => Ok(Currency::Usd),
            other => Err(CurrencyError(other.to_string())),
        }
    }
}

impl core::str::FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::try_from(s)
    }
}
