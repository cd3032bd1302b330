//! `storefront-page`
//!
//! **Responsibility:** the storefront's page-interaction layer.
//!
//! This crate provides:
//! - Quantity steppers (floor-clamped at 1)
//! - A submit guard for forms that need validation
//! - Client-side search and price filtering of product cards
//! - Transient notifications that remove themselves
//! - Cart and admin actions backed by [`storefront_client::StorefrontApi`]
//!
//! Handlers read the document at the moment their event fires and keep no
//! state of their own. Modal dialogs and page reloads are injected
//! capabilities ([`ModalHost`], [`PageReloader`]) rather than globals.

pub mod admin;
pub mod cart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod form_guard;
pub mod modal;
pub mod notify;
pub mod page;
pub mod reload;
pub mod shared;
pub mod stepper;

#[cfg(test)]
mod testing;

pub use admin::AdminActions;
pub use cart::{ActionOutcome, CartActions};
pub use config::PageConfig;
pub use error::{PageError, PageResult};
pub use filter::FilterSummary;
pub use form_guard::{FormVerdict, SubmitEvent};
pub use modal::{DomModalHost, ModalHost};
pub use notify::{Notifier, Severity};
pub use page::{Bindings, Handled, Page, PageEvent};
pub use reload::{PageReloader, RecordingReloader};
pub use shared::SharedDocument;
pub use stepper::StepDirection;
