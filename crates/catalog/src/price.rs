//! Price text parsing and the price-bracket filter table.

use core::str::FromStr;

use storefront_core::ValueObject;

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥'];

/// Parse a rendered price such as `"$1,249.50"` into a number.
///
/// One leading currency symbol and any `,` grouping separators are ignored,
/// then the longest leading decimal number is taken (`"19.99 USD"` is
/// `19.99`). Returns `None` when no number can be read.
pub fn parse_price(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let unsymboled = trimmed
        .strip_prefix(CURRENCY_SYMBOLS)
        .unwrap_or(trimmed)
        .trim_start();
    let cleaned: String = unsymboled.chars().filter(|c| *c != ',').collect();
    parse_float_prefix(&cleaned)
}

/// Longest prefix of `s` that reads as a decimal float (sign, digits,
/// fraction, exponent).
fn parse_float_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// A price range selectable in the catalog's price filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceBracket {
    /// `0-50`: price in `[0, 50]`.
    UpTo50,
    /// `50-100`: price in `(50, 100]`.
    From50To100,
    /// `100-200`: price in `(100, 200]`.
    From100To200,
    /// `200+`: price above 200.
    Over200,
    /// Any other token (including "all"); admits every card.
    Unrecognized(String),
}

impl ValueObject for PriceBracket {}

impl PriceBracket {
    pub fn parse(token: &str) -> Self {
        match token {
            "0-50" => Self::UpTo50,
            "50-100" => Self::From50To100,
            "100-200" => Self::From100To200,
            "200+" => Self::Over200,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Self::UpTo50 => "0-50",
            Self::From50To100 => "50-100",
            Self::From100To200 => "100-200",
            Self::Over200 => "200+",
            Self::Unrecognized(token) => token,
        }
    }

    /// Whether a card with this price stays visible.
    ///
    /// An unreadable price (`None`) never satisfies a recognized bracket;
    /// unrecognized brackets fail open.
    pub fn admits(&self, price: Option<f64>) -> bool {
        if let Self::Unrecognized(_) = self {
            return true;
        }
        let Some(p) = price else {
            return false;
        };
        match self {
            Self::UpTo50 => (0.0..=50.0).contains(&p),
            Self::From50To100 => p > 50.0 && p <= 100.0,
            Self::From100To200 => p > 100.0 && p <= 200.0,
            Self::Over200 => p > 200.0,
            Self::Unrecognized(_) => true,
        }
    }
}

impl FromStr for PriceBracket {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl core::fmt::Display for PriceBracket {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.token())
    }
}
