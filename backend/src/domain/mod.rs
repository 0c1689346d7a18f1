//! # Domain Module
//!
//! Contains all business logic for the expense tracker.
//!
//! ## Module Organization
//!
//! - **expense_store**: The session's expenses, categories and recommendations,
//!   with mutation and derived views
//! - **dashboard_service**: Monthly summaries, category breakdowns and trends
//! - **expense_table**: Display formatting and add-expense form validation
//! - **commands**: Query and command inputs for the services
//! - **models**: Expense ID generation, date interpretation, validation errors
//! - **clock**: Time source for record timestamps
//!
//! ## Business Rules
//!
//! - Expense amounts are never negative
//! - Categories and recommendations do not change after load
//! - Category references are resolved at read time; unknown ids are tolerated
//! - Every time-scoped query takes its reference date explicitly

pub mod clock;
pub mod commands;
pub mod dashboard_service;
pub mod expense_store;
pub mod expense_table;
pub mod models;

pub use clock::{Clock, SystemClock};
pub use commands::expenses::{CreateExpenseCommand, ExpenseQuery};
pub use dashboard_service::{percent_change, DashboardService};
pub use expense_store::{ExpenseStore, LoadOutcome};
pub use expense_table::{DateFormat, ExpenseTableConfig, ExpenseTableService};
pub use models::expense::ExpenseValidationError;
