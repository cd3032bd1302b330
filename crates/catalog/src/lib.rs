//! Catalog view logic.
//!
//! This crate contains the rules the storefront applies to rendered product
//! cards (price brackets, text search) and the admin product record shape,
//! implemented purely as deterministic logic (no DOM, no HTTP).

pub mod card;
pub mod price;
pub mod record;

pub use card::{ProductCard, TextQuery};
pub use price::{PriceBracket, parse_price};
pub use record::ProductRecord;
