//! Currency domain model
//!
//! The ledger supports a closed set of currencies. Invalid values are
//! unrepresentable inside the core; external input (string codes, numeric
//! discriminants from a wire format) is checked at the boundary via
//! `FromStr` / `TryFrom<i32>`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::result::Error;

/// A supported ledger currency
///
/// `Rub` is the base unit: its exchange rate is pinned to 1 regardless of
/// what the remote quote feed reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Rub,
    Eur,
    Usd,
}

impl Currency {
    /// The base unit all quotes are expressed against
    pub const BASE: Currency = Currency::Rub;

    /// Every supported currency
    pub const ALL: [Currency; 3] = [Currency::Rub, Currency::Eur, Currency::Usd];

    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Rub => "RUB",
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }

    pub fn is_base(&self) -> bool {
        *self == Self::BASE
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RUB" => Ok(Currency::Rub),
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            other => Err(Error::validation(
                "currency.supported",
                format!("unsupported currency {other:?}; supported: RUB, EUR, USD"),
            )),
        }
    }
}

impl TryFrom<i32> for Currency {
    type Error = Error;

    /// Membership check for numeric discriminants arriving from a wire format
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Currency::Rub),
            1 => Ok(Currency::Eur),
            2 => Ok(Currency::Usd),
            other => Err(Error::validation(
                "currency.supported",
                format!("unsupported currency discriminant {other}; supported: RUB, EUR, USD"),
            )),
        }
    }
}
