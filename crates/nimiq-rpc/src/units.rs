//! Conversion between luna (the indivisible subunit) and NIM.
//!
//! Amounts leave the process as integer luna. Callers may supply either
//! luna or NIM through [`Amount`]; [`normalize_amount`] is the single gate
//! every amount-bearing call passes through before it is serialized.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::Error;

/// Number of luna in one NIM.
pub const SUBUNITS_PER_COIN: u64 = 100_000;

/// Decimal places represented by one luna.
const SUBUNIT_SCALE: u32 = 5;

/// An amount as supplied by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amount {
    /// Already expressed in luna.
    Subunits(u64),
    /// Expressed in NIM; converted with [`coin_to_subunits`].
    Coins(Decimal),
}

impl From<u64> for Amount {
    fn from(luna: u64) -> Self {
        Amount::Subunits(luna)
    }
}

impl From<Decimal> for Amount {
    fn from(coins: Decimal) -> Self {
        Amount::Coins(coins)
    }
}

/// Parses a decimal NIM amount such as `"12.5"`.
impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str_exact(s.trim())
            .map(Amount::Coins)
            .map_err(|e| Error::InvalidAmount(format!("`{s}` is not a decimal amount: {e}")))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Subunits(luna) => write!(f, "{luna} luna"),
            Amount::Coins(coins) => write!(f, "{coins} NIM"),
        }
    }
}

/// Exact conversion of luna into NIM.
pub fn subunits_to_coin(luna: u64) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(luna), SUBUNIT_SCALE).normalize()
}

/// Converts NIM into luna, truncating any sub-luna remainder toward zero.
///
/// Negative amounts and amounts beyond `u64::MAX` luna are rejected.
pub fn coin_to_subunits(coins: Decimal) -> Result<u64, Error> {
    if coins.is_sign_negative() && !coins.is_zero() {
        return Err(Error::InvalidAmount(format!(
            "negative amount {coins} NIM"
        )));
    }

    coins
        .checked_mul(Decimal::from(SUBUNITS_PER_COIN))
        .map(|luna| luna.trunc())
        .and_then(|luna| luna.to_u64())
        .ok_or_else(|| Error::InvalidAmount(format!("{coins} NIM is out of range")))
}

pub fn normalize_amount(amount: Amount) -> Result<u64, Error> {
    match amount {
        Amount::Subunits(luna) => Ok(luna),
        Amount::Coins(coins) => coin_to_subunits(coins),
    }
}
