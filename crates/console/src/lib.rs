//! `storefront-console`
//!
//! Headless driver for the storefront page layer: renders a page fixture,
//! binds it, and replays typed commands (search, filter, cart and admin
//! actions) against a live server.

pub mod command;
pub mod fixture;
pub mod session;

pub use command::{Command, CommandError};
pub use fixture::{FixtureError, PageFixture};
pub use session::{Session, Step};
