//! # Storage Module
//!
//! Supplies the expense store with its seed data. Nothing here persists;
//! every provider is read once per `load()`.
//!
//! ## Providers
//!
//! - **MockFixtureProvider**: built-in demo data behind a simulated delay
//! - **JsonFixtureProvider**: seed data read from a JSON file
//!
//! Both implement [`FixtureProvider`], so the domain layer never knows which
//! one it is talking to.

pub mod json;
pub mod mock;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use json::JsonFixtureProvider;
pub use mock::{MockFixtureProvider, DEFAULT_FIXTURE_DELAY};
pub use traits::FixtureProvider;
