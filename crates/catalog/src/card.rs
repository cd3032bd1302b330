//! Product cards as read from the rendered catalog, and the text query.

use storefront_core::ValueObject;

use crate::price::{PriceBracket, parse_price};

/// The filterable attributes of one rendered product card.
///
/// Cards have no identity beyond their position on the page; this is a
/// snapshot of their text taken when a filter event fires.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub name: String,
    pub price_text: String,
}

impl ProductCard {
    pub fn new(name: impl Into<String>, price_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price_text: price_text.into(),
        }
    }

    pub fn price(&self) -> Option<f64> {
        parse_price(&self.price_text)
    }

    pub fn matches_query(&self, query: &TextQuery) -> bool {
        query.matches(&self.name)
    }

    pub fn in_bracket(&self, bracket: &PriceBracket) -> bool {
        bracket.admits(self.price())
    }
}

/// A case-insensitive substring query typed into the search box.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextQuery {
    needle: String,
}

impl ValueObject for TextQuery {}

impl TextQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.to_lowercase(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Empty queries match everything.
    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.needle)
    }
}
