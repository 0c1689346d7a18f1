//! # Expense Tracker Backend
//!
//! Non-UI logic for the expense tracker: an in-memory expense store seeded
//! from a fixture provider, plus the dashboard and table services that read
//! from it.
//!
//! ## Architecture
//!
//! ```text
//! Presentation layer (any UI)
//!     ↓
//! Domain layer (ExpenseStore, DashboardService, ExpenseTableService)
//!     ↓
//! Storage layer (FixtureProvider implementations)
//! ```
//!
//! [`AppState`] is the application-root context; consumers receive clones of
//! it (or of its services) instead of reaching for a global.

pub mod config;
pub mod domain;
pub mod storage;

use std::sync::Arc;
use tracing::info;

use crate::config::TrackerConfig;
use crate::domain::{DashboardService, ExpenseStore, ExpenseTableService};
use crate::storage::{FixtureProvider, JsonFixtureProvider, MockFixtureProvider};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub store: ExpenseStore,
    pub dashboard_service: DashboardService,
    pub expense_table_service: ExpenseTableService,
    pub config: TrackerConfig,
}

/// Wire up the services. The store is created empty; call `store.load()` to seed it.
pub fn initialize_backend(config: TrackerConfig) -> AppState {
    let provider: Arc<dyn FixtureProvider> = match &config.fixture_path {
        Some(path) => Arc::new(JsonFixtureProvider::new(path)),
        None => Arc::new(MockFixtureProvider::new(config.fixture_delay())),
    };
    info!("Setting up expense store with {}", provider.describe());

    let store = ExpenseStore::new(provider);
    let dashboard_service = DashboardService::new(store.clone());
    let expense_table_service = ExpenseTableService::with_config(config.table_config());

    AppState {
        store,
        dashboard_service,
        expense_table_service,
        config,
    }
}
