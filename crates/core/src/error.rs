//! Errors raised while turning raw page or path text into storefront values.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Rejected input. Every variant keeps the offending text so handlers can
/// log it verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Text that cannot be a cart quantity (no digits, or zero where a
    /// positive count is required).
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// A product or cart-line id that is not a non-negative integer.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
