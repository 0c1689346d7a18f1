//! # Storage Traits
//!
//! The seam between the expense store and wherever its seed data comes from.
//! Today that is built-in mock data or a JSON file; a remote backend would
//! implement the same trait.

use anyhow::Result;
use async_trait::async_trait;
use shared::SeedData;

/// Source of the initial expenses, categories and budget recommendations
///
/// Implementations may take arbitrarily long; the store stays usable (and
/// empty) while a load is pending.
#[async_trait]
pub trait FixtureProvider: Send + Sync {
    /// Fetch the complete seed
    async fn load_seed(&self) -> Result<SeedData>;

    /// Short name for log lines
    fn describe(&self) -> String;
}
