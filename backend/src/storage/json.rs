//! # JSON Fixture Provider
//!
//! Loads seed data from a single JSON document:
//!
//! ```json
//! {
//!   "categories": [{ "id": "cat1", "name": "Shopping", "color": "#10B981", "icon": "ShoppingBag" }],
//!   "expenses": [],
//!   "recommendations": []
//! }
//! ```
//!
//! Missing top-level arrays are treated as empty.

use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::SeedData;
use std::path::{Path, PathBuf};
use tracing::info;

use super::traits::FixtureProvider;

#[derive(Debug, Clone)]
pub struct JsonFixtureProvider {
    path: PathBuf,
}

impl JsonFixtureProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FixtureProvider for JsonFixtureProvider {
    async fn load_seed(&self) -> Result<SeedData> {
        info!("Reading fixtures from {}", self.path.display());
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read fixture file {}", self.path.display()))?;

        let seed: SeedData = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse fixture file {}", self.path.display()))?;

        Ok(seed)
    }

    fn describe(&self) -> String {
        format!("JSON fixtures at {}", self.path.display())
    }
}
