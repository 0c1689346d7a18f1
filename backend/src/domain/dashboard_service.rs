//! Dashboard and report metrics for the expense tracker.
//!
//! Everything here is computed on demand from an [`ExpenseStore`] snapshot.
//! Time-scoped calls take the reference date explicitly so the same inputs
//! always produce the same numbers.

use chrono::{Datelike, NaiveDate};
use shared::{BudgetStatus, CategorySpend, MonthlySummary, TrendPoint};
use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::expense_store::ExpenseStore;

pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";
pub const UNKNOWN_CATEGORY_COLOR: &str = "#9CA3AF";

/// Percent change from `previous` to `current`.
///
/// With no previous spend, any current spend counts as a 100% rise.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    (current - previous) / previous * 100.0
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// First day of the month `offset` months away from `reference`'s month.
pub fn shift_month(reference: NaiveDate, offset: i32) -> Option<NaiveDate> {
    let zero_based = reference.year() * 12 + reference.month0() as i32 + offset;
    let year = zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
}

#[derive(Clone)]
pub struct DashboardService {
    store: ExpenseStore,
}

impl DashboardService {
    pub fn new(store: ExpenseStore) -> Self {
        Self { store }
    }

    /// Stat-card numbers for the month containing `reference`.
    pub fn monthly_summary(&self, reference: NaiveDate) -> MonthlySummary {
        let total = self.store.monthly_total(reference);
        let previous_month_total = shift_month(reference, -1)
            .map(|previous| self.store.monthly_total(previous))
            .unwrap_or(0.0);
        let days = days_in_month(reference.month(), reference.year());

        let breakdown = self.category_breakdown(reference);
        let budget_status = self.total_budget().map(|budget| BudgetStatus {
            budget,
            spent: total,
            percent_used: if budget > 0.0 { total / budget * 100.0 } else { 0.0 },
        });

        debug!(
            "Summary for {}-{:02}: total={:.2}, previous={:.2}",
            reference.year(),
            reference.month(),
            total,
            previous_month_total
        );

        MonthlySummary {
            month: reference.month(),
            year: reference.year(),
            total,
            previous_month_total,
            percent_change: percent_change(total, previous_month_total),
            average_per_day: total / f64::from(days),
            top_category: breakdown.into_iter().next(),
            budget_status,
        }
    }

    /// Spend per category within the month, largest first.
    ///
    /// Ties are ordered by category id. Dangling ids show up as "Unknown".
    pub fn category_breakdown(&self, reference: NaiveDate) -> Vec<CategorySpend> {
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for expense in self.store.expenses_in_month(reference) {
            *totals.entry(expense.category_id).or_insert(0.0) += expense.amount;
        }

        let month_total: f64 = totals.values().sum();
        let mut breakdown: Vec<CategorySpend> = totals
            .into_iter()
            .map(|(category_id, amount)| {
                let (name, color) = match self.store.category_of(&category_id) {
                    Some(category) => (category.name, category.color),
                    None => (UNKNOWN_CATEGORY_NAME.to_string(), UNKNOWN_CATEGORY_COLOR.to_string()),
                };
                CategorySpend {
                    category_id,
                    name,
                    color,
                    amount,
                    share: if month_total > 0.0 { amount / month_total * 100.0 } else { 0.0 },
                }
            })
            .collect();

        // BTreeMap iteration already ordered ids; a stable sort keeps that for ties.
        breakdown.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        breakdown
    }

    /// Totals for `months` calendar months ending with the reference month, oldest first.
    pub fn monthly_trend(&self, reference: NaiveDate, months: u32) -> Vec<TrendPoint> {
        let budget = self.total_budget();
        (0..months as i32)
            .rev()
            .filter_map(|back| shift_month(reference, -back))
            .map(|month_start| TrendPoint {
                label: month_start.format("%b").to_string(),
                month: month_start.month(),
                year: month_start.year(),
                amount: self.store.monthly_total(month_start),
                budget,
            })
            .collect()
    }

    /// Sum of every expense flagged as recurring.
    pub fn recurring_total(&self) -> f64 {
        self.store
            .expenses()
            .iter()
            .filter(|expense| expense.is_recurring)
            .map(|expense| expense.amount)
            .sum()
    }

    /// Sum of category budgets, or `None` when no category has one.
    fn total_budget(&self) -> Option<f64> {
        self.store
            .categories()
            .iter()
            .filter_map(|category| category.budget)
            .fold(None, |acc, budget| Some(acc.unwrap_or(0.0) + budget))
    }
}
