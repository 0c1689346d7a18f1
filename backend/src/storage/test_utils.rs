//! Test providers shared by the domain tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::SeedData;
use std::sync::Arc;
use tokio::sync::Notify;

use super::traits::FixtureProvider;

/// Returns the same seed on every load.
pub struct StaticProvider(pub SeedData);

#[async_trait]
impl FixtureProvider for StaticProvider {
    async fn load_seed(&self) -> Result<SeedData> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "static seed".to_string()
    }
}

/// Always fails, like an unreachable backend.
pub struct FailingProvider;

#[async_trait]
impl FixtureProvider for FailingProvider {
    async fn load_seed(&self) -> Result<SeedData> {
        Err(anyhow!("backend unreachable"))
    }

    fn describe(&self) -> String {
        "failing provider".to_string()
    }
}

/// Holds the load until the test signals the gate.
pub struct GatedProvider {
    pub gate: Arc<Notify>,
    pub seed: SeedData,
}

#[async_trait]
impl FixtureProvider for GatedProvider {
    async fn load_seed(&self) -> Result<SeedData> {
        self.gate.notified().await;
        Ok(self.seed.clone())
    }

    fn describe(&self) -> String {
        "gated provider".to_string()
    }
}
