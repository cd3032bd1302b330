//! `storefront-dom`: in-memory document tree.
//!
//! A small arena-backed stand-in for the browser DOM: elements with classes,
//! attributes, values, inline style and text, a selector engine covering the
//! selectors the storefront markup uses, and native form constraint checks.
//! Page handlers take a `&Document`/`&mut Document` plus the node ids they
//! act on, so every handler can be exercised without a browser.

pub mod document;
pub mod error;
pub mod selector;
pub mod spec;
pub mod validity;

pub use document::{Document, NodeId};
pub use error::{DomError, DomResult};
pub use selector::Selector;
pub use spec::ElementSpec;
pub use validity::Validity;
