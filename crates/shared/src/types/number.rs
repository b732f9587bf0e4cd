//! Safe-number coercion at the form boundary.
//!
//! Form input arrives loosely typed: numbers, numeric strings, blanks and
//! occasionally garbage. `SafeDecimal` collapses all of it into a valid
//! `Decimal` exactly once, so code behind the boundary never sees an
//! invalid number.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A decimal whose construction never fails.
///
/// Missing, null, non-numeric and unrepresentable inputs become zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SafeDecimal(Decimal);

impl SafeDecimal {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Returns the inner decimal.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Coerces a text value. Accepts plain and scientific notation.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Self)
            .unwrap_or_default()
    }

    /// Coerces an arbitrary JSON value.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(number) => Self::from_text(&number.to_string()),
            Value::String(text) => Self::from_text(text),
            Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => Self::ZERO,
        }
    }
}

impl From<Decimal> for SafeDecimal {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<SafeDecimal> for Decimal {
    fn from(value: SafeDecimal) -> Self {
        value.0
    }
}

impl<'de> Deserialize<'de> for SafeDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

impl std::fmt::Display for SafeDecimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
