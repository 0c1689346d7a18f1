//! Expense table domain logic for the expense tracker.
//!
//! Turns raw expenses into display rows and validates the add-expense form
//! before anything reaches the store.
//!
//! ## Key Responsibilities
//!
//! - **Table Formatting**: Converting expenses into formatted display rows
//! - **Amount Formatting**: Currency symbol, thousands separators, two decimals
//! - **Date Formatting**: Long, short and ISO date styles
//! - **Input Validation**: Checking form input before submission

use anyhow::{anyhow, Result};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use shared::{Expense, FormattedExpense, ValidationError, ValidationResult};

use crate::domain::dashboard_service::{UNKNOWN_CATEGORY_COLOR, UNKNOWN_CATEGORY_NAME};
use crate::domain::expense_store::ExpenseStore;
use crate::domain::models::expense::parse_expense_date;

pub const MAX_DESCRIPTION_LENGTH: usize = 256;
pub const MAX_AMOUNT: f64 = 1_000_000.0;

/// Configuration for expense table display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseTableConfig {
    /// ISO 4217 code, e.g. "USD"
    pub currency: String,
    pub date_format: DateFormat,
}

/// Date formatting options
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    #[default]
    MonthDayYear, // "March 5, 2024"
    ShortDate,    // "03/05/2024"
    Iso,          // "2024-03-05"
}

#[derive(Clone)]
pub struct ExpenseTableService {
    config: ExpenseTableConfig,
}

impl ExpenseTableService {
    pub fn new() -> Self {
        Self {
            config: ExpenseTableConfig::default(),
        }
    }

    pub fn with_config(config: ExpenseTableConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExpenseTableConfig {
        &self.config
    }

    /// Format expenses for display, resolving category names through the store
    pub fn format_expenses(&self, expenses: &[Expense], store: &ExpenseStore) -> Vec<FormattedExpense> {
        expenses
            .iter()
            .map(|expense| self.format_single_expense(expense, store))
            .collect()
    }

    pub fn format_single_expense(&self, expense: &Expense, store: &ExpenseStore) -> FormattedExpense {
        let (category_name, category_color) = match store.category_of(&expense.category_id) {
            Some(category) => (category.name, category.color),
            None => (UNKNOWN_CATEGORY_NAME.to_string(), UNKNOWN_CATEGORY_COLOR.to_string()),
        };

        FormattedExpense {
            id: expense.id.clone(),
            formatted_date: self.format_date(&expense.date),
            description: expense.description.clone(),
            category_name,
            category_color,
            formatted_amount: self.format_currency(expense.amount),
            raw_amount: expense.amount,
            raw_date: expense.date.clone(),
            is_recurring: expense.is_recurring,
        }
    }

    /// "$1,234.50"; negative values get a leading "-"
    pub fn format_currency(&self, value: f64) -> String {
        let cents = (value.abs() * 100.0).round() as u64;
        let whole = group_thousands(cents / 100);
        let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
        format!("{}{}{}.{:02}", sign, self.currency_symbol(), whole, cents % 100)
    }

    /// One decimal place, e.g. "12.5%"
    pub fn format_percent(&self, value: f64) -> String {
        format!("{:.1}%", value)
    }

    /// Format a date for display based on configuration; unparseable input is echoed
    pub fn format_date(&self, date: &str) -> String {
        let Some(day) = parse_expense_date(date) else {
            return date.to_string();
        };

        match self.config.date_format {
            DateFormat::MonthDayYear => format!("{} {}, {}", day.format("%B"), day.day(), day.year()),
            DateFormat::ShortDate => format!("{:02}/{:02}/{}", day.month(), day.day(), day.year()),
            DateFormat::Iso => day.format("%Y-%m-%d").to_string(),
        }
    }

    /// Cut `text` to `max_length` characters followed by "..."
    pub fn truncate_text(&self, text: &str, max_length: usize) -> String {
        if text.chars().count() <= max_length {
            return text.to_string();
        }
        let truncated: String = text.chars().take(max_length).collect();
        format!("{}...", truncated)
    }

    /// Validate add-expense form input
    pub fn validate_expense_input(
        &self,
        description: &str,
        amount_input: &str,
        date: &str,
        category_id: &str,
    ) -> ValidationResult {
        let mut errors = Vec::new();

        if description.trim().is_empty() {
            errors.push(ValidationError::EmptyDescription);
        } else if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            errors.push(ValidationError::DescriptionTooLong(description.chars().count()));
        }

        let cleaned_amount = match self.clean_and_parse_amount(amount_input) {
            Ok(amount) if amount <= 0.0 => {
                errors.push(ValidationError::AmountNotPositive);
                None
            }
            Ok(amount) if amount > MAX_AMOUNT => {
                errors.push(ValidationError::AmountTooLarge);
                None
            }
            Ok(amount) => Some(amount),
            Err(parse_error) => {
                errors.push(ValidationError::InvalidAmount(parse_error.to_string()));
                None
            }
        };

        if date.trim().is_empty() {
            errors.push(ValidationError::MissingDate);
        } else if parse_expense_date(date).is_none() {
            errors.push(ValidationError::InvalidDate(date.to_string()));
        }

        if category_id.trim().is_empty() {
            errors.push(ValidationError::MissingCategory);
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            cleaned_amount,
        }
    }

    /// Strip "$", "," and spaces, then parse
    pub fn clean_and_parse_amount(&self, amount_input: &str) -> Result<f64> {
        let cleaned: String = amount_input
            .trim()
            .chars()
            .filter(|c| !matches!(c, '$' | ',' | ' '))
            .collect();

        if cleaned.is_empty() {
            return Err(anyhow!("Amount is required"));
        }

        let amount = cleaned
            .parse::<f64>()
            .map_err(|e| anyhow!("Invalid number format: {}", e))?;
        if !amount.is_finite() {
            return Err(anyhow!("Invalid number format: {}", cleaned));
        }
        Ok(amount)
    }

    pub fn validation_error_message(&self, error: &ValidationError) -> String {
        match error {
            ValidationError::EmptyDescription => "Please enter a description".to_string(),
            ValidationError::DescriptionTooLong(len) => format!(
                "Description is too long ({} characters). Maximum is {}.",
                len, MAX_DESCRIPTION_LENGTH
            ),
            ValidationError::InvalidAmount(msg) => {
                format!("Please enter a valid amount (like 5 or 5.00): {}", msg)
            }
            ValidationError::AmountNotPositive => "Amount must be greater than 0".to_string(),
            ValidationError::AmountTooLarge => {
                format!("Amount is too large. Maximum is {}", self.format_currency(MAX_AMOUNT))
            }
            ValidationError::MissingDate => "Please choose a date".to_string(),
            ValidationError::InvalidDate(date) => format!("'{}' is not a valid date", date),
            ValidationError::MissingCategory => "Please choose a category".to_string(),
        }
    }

    pub fn validation_error_messages(&self, errors: &[ValidationError]) -> Vec<String> {
        errors.iter().map(|e| self.validation_error_message(e)).collect()
    }

    fn currency_symbol(&self) -> String {
        match self.config.currency.to_ascii_uppercase().as_str() {
            "USD" | "CAD" | "AUD" => "$".to_string(),
            "EUR" => "€".to_string(),
            "GBP" => "£".to_string(),
            "JPY" => "¥".to_string(),
            other => format!("{} ", other),
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

impl Default for ExpenseTableService {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for ExpenseTableConfig {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            date_format: DateFormat::MonthDayYear,
        }
    }
}
