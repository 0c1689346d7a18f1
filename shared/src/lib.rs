use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Expense ID in format: "expense::epoch_millis::suffix"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    /// Amount spent (never negative)
    pub amount: f64,
    /// Free-text label shown in lists
    pub description: String,
    /// ISO-8601 date ("2024-03-05") or RFC 3339 timestamp
    pub date: String,
    /// Category reference, not checked against the catalog
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A classification bucket for expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Display hint, e.g. "#10B981"
    pub color: String,
    /// Display hint, icon name
    pub icon: String,
    /// Advisory monthly ceiling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecommendation {
    pub id: String,
    pub category_id: String,
    pub recommended_amount: f64,
    pub previous_amount: f64,
    pub reason: String,
    /// Between 0.0 and 1.0
    pub confidence_score: f64,
}

/// Partial update for an expense. `None` leaves a field untouched.
///
/// `notes` and `receipt_url` are clearable: `Some(None)` removes the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpensePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<Option<String>>,
}

/// An explicit `null` becomes `Some(None)`; a missing key stays `None` via `default`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Display order for expense lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    DateAsc,
    #[default]
    DateDesc,
    AmountAsc,
    AmountDesc,
}

/// Everything a fixture provider hands to the store at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub recommendations: Vec<BudgetRecommendation>,
}

/// Spend for one category within a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category_id: String,
    pub name: String,
    pub color: String,
    pub amount: f64,
    /// Share of the month total, 0-100
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    /// Sum of all category budgets
    pub budget: f64,
    pub spent: f64,
    pub percent_used: f64,
}

/// Numbers behind the dashboard stat cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    pub total: f64,
    pub previous_month_total: f64,
    pub percent_change: f64,
    pub average_per_day: f64,
    pub top_category: Option<CategorySpend>,
    pub budget_status: Option<BudgetStatus>,
}

/// One bar of the monthly spending trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Short month label, e.g. "Mar"
    pub label: String,
    pub month: u32,
    pub year: i32,
    pub amount: f64,
    pub budget: Option<f64>,
}

/// Represents a formatted expense for display purposes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormattedExpense {
    pub id: String,
    pub formatted_date: String,
    pub description: String,
    pub category_name: String,
    pub category_color: String,
    pub formatted_amount: String,
    pub raw_amount: f64,
    pub raw_date: String,
    pub is_recurring: bool,
}

/// Validation result for the add-expense form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub cleaned_amount: Option<f64>,
}

/// Specific validation errors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ValidationError {
    EmptyDescription,
    DescriptionTooLong(usize),
    InvalidAmount(String),
    AmountNotPositive,
    AmountTooLarge,
    MissingDate,
    InvalidDate(String),
    MissingCategory,
}

impl Expense {
    /// Generate expense ID from creation time and a random-ish suffix
    pub fn generate_id(epoch_millis: u64, suffix: &str) -> String {
        format!("expense::{}::{}", epoch_millis, suffix)
    }

    /// Parse expense ID to extract components
    pub fn parse_id(id: &str) -> Result<(u64, String), ExpenseIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 3 || parts[0] != "expense" {
            return Err(ExpenseIdError::InvalidFormat);
        }

        let epoch_millis = parts[1]
            .parse::<u64>()
            .map_err(|_| ExpenseIdError::InvalidTimestamp)?;

        if parts[2].is_empty() {
            return Err(ExpenseIdError::MissingSuffix);
        }

        Ok((epoch_millis, parts[2].to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseIdError {
    InvalidFormat,
    InvalidTimestamp,
    MissingSuffix,
}

impl fmt::Display for ExpenseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseIdError::InvalidFormat => write!(f, "Invalid expense ID format"),
            ExpenseIdError::InvalidTimestamp => write!(f, "Invalid timestamp in expense ID"),
            ExpenseIdError::MissingSuffix => write!(f, "Expense ID is missing its suffix"),
        }
    }
}

impl std::error::Error for ExpenseIdError {}
