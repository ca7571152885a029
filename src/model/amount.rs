//! Amount type for handling signed monetary values as typed into a ledger sheet.
//!
//! Sheets filled in from a European locale use a comma as the decimal separator, e.g. `-12,50`,
//! and sometimes a dot to group thousands, e.g. `-1.200,50`. This module parses both of those as
//! well as the plain `-1200.50` form.

use crate::model::Cell;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// A signed amount of money. The sign is the direction of the transaction: negative amounts are
/// expenses, everything else is income.
///
/// # Examples
///
/// Comma as the decimal separator:
/// ```
/// # use telexpense::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("-12,50").unwrap();
/// assert_eq!(amount.value().to_string(), "-12.50");
/// ```
///
/// Dot-grouped thousands with a decimal comma:
/// ```
/// # use telexpense::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("-1.200,50").unwrap();
/// assert_eq!(amount.value().to_string(), "-1200.50");
/// assert_eq!(amount.to_string(), "-1,200.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    /// The largest magnitude a ledger amount may have: one quadrillion. Sums over many billions
    /// of such rows still fit in a `Decimal`, so aggregating a ledger cannot overflow.
    pub const MAX_MAGNITUDE: Decimal =
        Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Parses a sheet cell. Numeric cells are taken as they are, textual cells are parsed with
    /// `FromStr`, and empty cells are an error. Magnitudes above `MAX_MAGNITUDE` are an error.
    pub fn from_cell(cell: &Cell) -> Result<Self, AmountError> {
        match cell {
            Cell::Number(value) => Amount::bounded(*value, || value.to_string()),
            Cell::Text(s) => Amount::from_str(s),
            Cell::Empty => Err(AmountError::new("", ErrorKind::Empty)),
        }
    }

    fn bounded(value: Decimal, input: impl FnOnce() -> String) -> Result<Self, AmountError> {
        if value.abs() > Self::MAX_MAGNITUDE {
            return Err(AmountError::new(input(), ErrorKind::TooLarge));
        }
        Ok(Amount::new(value))
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// The magnitude of the amount, without its direction.
    pub fn magnitude(&self) -> Decimal {
        self.value.abs()
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Returns true if the amount is strictly below zero. A negative zero is not negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.value.is_sign_negative()
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError {
    input: String,
    kind: ErrorKind,
}

#[derive(Debug)]
enum ErrorKind {
    Empty,
    NotANumber(Option<rust_decimal::Error>),
    TooLarge,
}

impl AmountError {
    fn new(input: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            input: input.into(),
            kind,
        }
    }

    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmountError")
            .field("input", &self.input)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Empty => write!(f, "is empty"),
            ErrorKind::NotANumber(None) => write!(f, "is not a number"),
            ErrorKind::NotANumber(Some(e)) => write!(f, "is not a number ({e})"),
            ErrorKind::TooLarge => write!(
                f,
                "is larger than the largest allowed amount {}",
                Amount::new(Amount::MAX_MAGNITUDE)
            ),
        }
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            ErrorKind::NotANumber(Some(e)) => Some(e as &(dyn Error + 'static)),
            _ => None,
        }
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::new(s, ErrorKind::Empty));
        }
        // Decimal::from_str reads `1_000` as 1000.
        if trimmed.contains('_') {
            return Err(AmountError::new(s, ErrorKind::NotANumber(None)));
        }

        let normalized = normalize_separators(trimmed);
        let value = Decimal::from_str(&normalized)
            .map_err(|e| AmountError::new(s, ErrorKind::NotANumber(Some(e))))?;
        Amount::bounded(value, || s.to_string())
    }
}

/// Rewrites `s` so that `.` is the only decimal separator and no grouping separators remain.
///
/// When both `.` and `,` occur, the right-most one is the decimal separator and the other one
/// groups thousands. Otherwise every `,` is a decimal comma.
fn normalize_separators(s: &str) -> String {
    match (s.rfind('.'), s.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => s.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => s.replace(',', ""),
        _ => s.replace(',', "."),
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "{sign}{}",
            format_num::format_num!(",.2", self.magnitude().to_f64().unwrap_or_default())
        )
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.value.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}
