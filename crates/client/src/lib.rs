//! `storefront-client`
//!
//! **Responsibility:** typed access to the storefront's cart and admin
//! endpoints.
//!
//! Every call returns a [`CallOutcome`] instead of an error: a transport
//! failure or a non-2xx reply is an expected result the page has to render,
//! not an exceptional one. Timeout and retry behaviour is explicit
//! configuration ([`ClientConfig`]); the default is a single attempt with no
//! timeout.

pub mod api;
pub mod config;
pub mod http;
pub mod outcome;

pub use api::{AddToCartResponse, QuantityBody, StorefrontApi, UpdateCartResponse};
pub use config::{ClientConfig, ConfigError, RetryPolicy};
pub use http::{ClientError, HttpStorefrontClient};
pub use outcome::CallOutcome;
