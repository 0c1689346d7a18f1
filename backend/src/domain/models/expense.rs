use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use shared::{Expense, ExpensePatch};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpenseValidationError {
    #[error("Expense ID cannot be empty")]
    EmptyId,
    #[error("An expense with ID {0} already exists")]
    DuplicateId(String),
    #[error("Amount cannot be negative (got {0})")]
    NegativeAmount(f64),
    #[error("Amount must be a finite number")]
    NonFiniteAmount,
}

/// Build a fresh expense ID for a record created at `now_millis`.
pub fn new_expense_id(now_millis: u64) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    Expense::generate_id(now_millis, &suffix[..12])
}

/// Structural checks applied before an expense enters the store.
pub fn validate_expense_shape(expense: &Expense) -> Result<(), ExpenseValidationError> {
    if expense.id.trim().is_empty() {
        return Err(ExpenseValidationError::EmptyId);
    }
    if !expense.amount.is_finite() {
        return Err(ExpenseValidationError::NonFiniteAmount);
    }
    if expense.amount < 0.0 {
        return Err(ExpenseValidationError::NegativeAmount(expense.amount));
    }
    Ok(())
}

/// Interpret an expense date as a local wall-clock instant.
///
/// Accepts a bare `YYYY-MM-DD` (midnight of that calendar day), a naive
/// `YYYY-MM-DDTHH:MM:SS`, or a full RFC 3339 timestamp converted to the
/// local timezone.
pub fn parse_expense_instant(date: &str) -> Option<NaiveDateTime> {
    let trimmed = date.trim();
    if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(day.and_time(NaiveTime::MIN));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

pub fn parse_expense_date(date: &str) -> Option<NaiveDate> {
    parse_expense_instant(date).map(|instant| instant.date())
}

/// True when the expense falls in the same calendar month and year as `reference`.
pub fn is_in_month(expense: &Expense, reference: NaiveDate) -> bool {
    parse_expense_date(&expense.date)
        .is_some_and(|day| day.year() == reference.year() && day.month() == reference.month())
}

/// Merge the fields present in `patch` into `expense`.
///
/// `id`, `created_at` and `updated_at` are left alone; the caller stamps
/// `updated_at`.
pub fn merge_patch(expense: &mut Expense, patch: ExpensePatch) {
    let ExpensePatch {
        amount,
        description,
        date,
        category_id,
        notes,
        is_recurring,
        tags,
        receipt_url,
    } = patch;

    if let Some(amount) = amount {
        expense.amount = amount;
    }
    if let Some(description) = description {
        expense.description = description;
    }
    if let Some(date) = date {
        expense.date = date;
    }
    if let Some(category_id) = category_id {
        expense.category_id = category_id;
    }
    if let Some(notes) = notes {
        expense.notes = notes;
    }
    if let Some(is_recurring) = is_recurring {
        expense.is_recurring = is_recurring;
    }
    if let Some(tags) = tags {
        expense.tags = tags;
    }
    if let Some(receipt_url) = receipt_url {
        expense.receipt_url = receipt_url;
    }
}
