//! Quantity value object (always ≥ 1).

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A positive item count bound to a quantity input or cart request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Quantity(u64);

impl ValueObject for Quantity {}

impl Quantity {
    /// The floor every stepper clamps to.
    pub const MIN: Quantity = Quantity(1);

    pub fn new(raw: u64) -> DomainResult<Self> {
        if raw == 0 {
            return Err(DomainError::quantity("quantity must be at least 1"));
        }
        Ok(Self(raw))
    }

    /// Build a quantity from any integer; values below one become one.
    pub fn clamped(raw: i64) -> Self {
        Self(raw.max(1).unsigned_abs())
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// Next value up. Only `u64::MAX` stays put, which no parsed input reaches.
    pub fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Next value down, never below [`Quantity::MIN`].
    pub fn decrement(self) -> Self {
        Self(self.0.saturating_sub(1).max(1))
    }

    /// Parse the text of a quantity input.
    ///
    /// Leading integer digits are honoured the way browsers parse integers
    /// (`"3 pcs"` is 3); values below one are clamped to [`Quantity::MIN`].
    /// Text with no leading digits is rejected.
    pub fn parse_input(text: &str) -> DomainResult<Self> {
        parse_int_prefix(text)
            .map(Self::clamped)
            .ok_or_else(|| DomainError::quantity(format!("not a quantity: {text:?}")))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u64> for Quantity {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Parse the longest leading integer of `text` (optional sign, then digits).
///
/// Leading whitespace is skipped and trailing garbage ignored. Returns `None`
/// when no digit follows the optional sign. Values beyond `i64` saturate.
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end]
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));

    Some(if negative { -magnitude } else { magnitude })
}
