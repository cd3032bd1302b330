//! `storefront-core`: shared storefront primitives.
//!
//! This crate contains **pure** building blocks (no DOM, no IO): typed
//! identifiers, the quantity value object and the shared error model.

pub mod error;
pub mod id;
pub mod quantity;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{CartItemId, ProductId};
pub use quantity::Quantity;
pub use value_object::ValueObject;
