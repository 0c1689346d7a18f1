//! # Tracker Configuration
//!
//! Settings are read from an optional YAML file and then overridden by
//! environment variables.
//!
//! ## YAML Format
//!
//! ```yaml
//! fixture_path: "./fixtures/seed.json"
//! fixture_delay_ms: 800
//! currency: "USD"
//! date_format: month_day_year
//! log_filter: "info"
//! trend_months: 6
//! ```
//!
//! Every key is optional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::expense_table::{DateFormat, ExpenseTableConfig};

pub const CONFIG_PATH_ENV: &str = "EXPENSE_TRACKER_CONFIG";
pub const FIXTURES_ENV: &str = "EXPENSE_TRACKER_FIXTURES";
pub const DELAY_ENV: &str = "EXPENSE_TRACKER_DELAY_MS";
pub const CURRENCY_ENV: &str = "EXPENSE_TRACKER_CURRENCY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// JSON seed file; built-in mock data when absent
    pub fixture_path: Option<PathBuf>,
    /// Simulated latency for the built-in mock data
    pub fixture_delay_ms: u64,
    pub currency: String,
    pub date_format: DateFormat,
    /// Used when RUST_LOG is unset
    pub log_filter: String,
    /// Months shown in the spending trend
    pub trend_months: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            fixture_path: None,
            fixture_delay_ms: 800,
            currency: "USD".to_string(),
            date_format: DateFormat::MonthDayYear,
            log_filter: "info".to_string(),
            trend_months: 6,
        }
    }
}

impl TrackerConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// File named by `EXPENSE_TRACKER_CONFIG` (or defaults), then env overrides.
    pub fn from_env() -> Result<Self> {
        let base = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::load_from_file(Path::new(&path))?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(path) = lookup(FIXTURES_ENV).filter(|value| !value.is_empty()) {
            self.fixture_path = Some(PathBuf::from(path));
        }
        if let Some(delay) = lookup(DELAY_ENV) {
            self.fixture_delay_ms = delay.trim().parse::<u64>().with_context(|| {
                format!("{} must be a whole number of milliseconds, got '{}'", DELAY_ENV, delay)
            })?;
        }
        if let Some(currency) = lookup(CURRENCY_ENV).filter(|value| !value.is_empty()) {
            self.currency = currency;
        }
        Ok(self)
    }

    pub fn fixture_delay(&self) -> Duration {
        Duration::from_millis(self.fixture_delay_ms)
    }

    pub fn table_config(&self) -> ExpenseTableConfig {
        ExpenseTableConfig {
            currency: self.currency.clone(),
            date_format: self.date_format,
        }
    }
}
