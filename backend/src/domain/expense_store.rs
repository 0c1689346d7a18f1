//! Expense store for the expense tracker.
//!
//! Owns the expense collection, the category catalog and the budget
//! recommendations for one session, and computes the derived views the
//! dashboard and expense list read: monthly totals, per-category sums and
//! filtered/sorted lists.
//!
//! ## Key Responsibilities
//!
//! - **Seeding**: `load()` pulls everything from a [`FixtureProvider`]
//! - **Mutation**: add, create, update and remove expenses
//! - **Derived Views**: monthly totals, category totals, list queries
//!
//! ## Rules
//!
//! - New expenses go to the front of the collection
//! - Unknown ids on update/remove are no-ops, never errors
//! - `updated_at` never precedes `created_at`
//! - Before `load()` completes every read sees empty collections

use chrono::NaiveDate;
use shared::{BudgetRecommendation, Category, Expense, ExpensePatch, SortKey};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, error, info, warn};

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::commands::expenses::{CreateExpenseCommand, ExpenseQuery};
use crate::domain::models::expense::{
    is_in_month, merge_patch, new_expense_id, parse_expense_instant, validate_expense_shape,
    ExpenseValidationError,
};
use crate::storage::FixtureProvider;

/// Result of a `load()` call, for the operator layer.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Seeded {
        expenses: usize,
        categories: usize,
        recommendations: usize,
    },
    /// The provider failed; the store is ready but empty.
    Failed(String),
}

#[derive(Debug, Default)]
struct StoreState {
    expenses: Vec<Expense>,
    categories: Vec<Category>,
    recommendations: Vec<BudgetRecommendation>,
    ready: bool,
}

/// Handle to the session's expense data. Clones share the same state.
#[derive(Clone)]
pub struct ExpenseStore {
    state: Arc<RwLock<StoreState>>,
    provider: Arc<dyn FixtureProvider>,
    clock: Arc<dyn Clock>,
}

impl ExpenseStore {
    pub fn new(provider: Arc<dyn FixtureProvider>) -> Self {
        Self::with_clock(provider, Arc::new(SystemClock))
    }

    pub fn with_clock(provider: Arc<dyn FixtureProvider>, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            provider,
            clock,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the store contents with whatever the provider returns.
    ///
    /// The store is not ready and empty while the provider is pending. A
    /// provider error leaves it ready and empty.
    pub async fn load(&self) -> LoadOutcome {
        {
            let mut state = self.write();
            state.ready = false;
            state.expenses.clear();
            state.categories.clear();
            state.recommendations.clear();
        }

        info!("Loading seed data from {}", self.provider.describe());
        let result = self.provider.load_seed().await;

        let mut state = self.write();
        let outcome = match result {
            Ok(seed) => {
                let outcome = LoadOutcome::Seeded {
                    expenses: seed.expenses.len(),
                    categories: seed.categories.len(),
                    recommendations: seed.recommendations.len(),
                };
                state.expenses = seed.expenses;
                state.categories = seed.categories;
                state.recommendations = seed.recommendations;
                info!(
                    "Loaded {} expenses, {} categories, {} recommendations",
                    state.expenses.len(),
                    state.categories.len(),
                    state.recommendations.len()
                );
                outcome
            }
            Err(e) => {
                error!("Error loading data: {:#}", e);
                LoadOutcome::Failed(format!("{:#}", e))
            }
        };
        state.ready = true;
        outcome
    }

    pub fn is_ready(&self) -> bool {
        self.read().ready
    }

    /// Insert a caller-built expense at the front of the collection.
    pub fn add(&self, expense: Expense) -> Result<(), ExpenseValidationError> {
        validate_expense_shape(&expense).inspect_err(|e| warn!("Rejected expense: {}", e))?;

        let mut state = self.write();
        if state.expenses.iter().any(|existing| existing.id == expense.id) {
            warn!("Rejected expense: duplicate id {}", expense.id);
            return Err(ExpenseValidationError::DuplicateId(expense.id));
        }

        debug!("Adding expense {} for ${:.2}", expense.id, expense.amount);
        state.expenses.insert(0, expense);
        Ok(())
    }

    /// Build a new expense with a fresh id and timestamps, then add it.
    pub fn create(&self, command: CreateExpenseCommand) -> Result<Expense, ExpenseValidationError> {
        let now = self.clock.now();
        let now_millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();

        let expense = Expense {
            id: new_expense_id(now_millis),
            amount: command.amount,
            description: command.description,
            date: command.date,
            category_id: command.category_id,
            receipt_url: command.receipt_url,
            notes: command.notes,
            is_recurring: command.is_recurring,
            tags: command.tags,
            created_at: now,
            updated_at: now,
        };

        self.add(expense.clone())?;
        Ok(expense)
    }

    /// Remove the expense with `id`. Returns whether anything was removed.
    pub fn remove(&self, id: &str) -> bool {
        let mut state = self.write();
        let before = state.expenses.len();
        state.expenses.retain(|expense| expense.id != id);
        let removed = state.expenses.len() != before;
        if !removed {
            debug!("Remove ignored: no expense with id {}", id);
        }
        removed
    }

    /// Remove every listed id; unknown ids are skipped. Returns the count removed.
    pub fn remove_many(&self, ids: &[String]) -> usize {
        let mut state = self.write();
        let before = state.expenses.len();
        state.expenses.retain(|expense| !ids.contains(&expense.id));
        before - state.expenses.len()
    }

    /// Merge `patch` into the expense with `id` and refresh `updated_at`.
    ///
    /// Returns the updated record, or `None` when no such expense exists.
    pub fn update(&self, id: &str, patch: ExpensePatch) -> Option<Expense> {
        let now = self.clock.now();
        let mut state = self.write();

        let Some(expense) = state.expenses.iter_mut().find(|expense| expense.id == id) else {
            debug!("Update ignored: no expense with id {}", id);
            return None;
        };

        merge_patch(expense, patch);
        expense.updated_at = now.max(expense.created_at);
        Some(expense.clone())
    }

    pub fn get(&self, id: &str) -> Option<Expense> {
        self.read().expenses.iter().find(|expense| expense.id == id).cloned()
    }

    /// Look up a category; absence is a normal outcome.
    pub fn category_of(&self, id: &str) -> Option<Category> {
        self.read().categories.iter().find(|category| category.id == id).cloned()
    }

    /// Snapshot of all expenses in insertion order.
    pub fn expenses(&self) -> Vec<Expense> {
        self.read().expenses.clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.read().categories.clone()
    }

    pub fn recommendations(&self) -> Vec<BudgetRecommendation> {
        self.read().recommendations.clone()
    }

    /// Expenses in the calendar month of `reference`, in insertion order.
    pub fn expenses_in_month(&self, reference: NaiveDate) -> Vec<Expense> {
        self.read()
            .expenses
            .iter()
            .filter(|expense| is_in_month(expense, reference))
            .cloned()
            .collect()
    }

    /// Sum of amounts for expenses in the same month and year as `reference`.
    pub fn monthly_total(&self, reference: NaiveDate) -> f64 {
        self.read()
            .expenses
            .iter()
            .filter(|expense| is_in_month(expense, reference))
            .map(|expense| expense.amount)
            .sum()
    }

    /// Sum of amounts per category id over the whole collection.
    ///
    /// Dangling category ids keep their own bucket.
    pub fn totals_by_category(&self) -> BTreeMap<String, f64> {
        let state = self.read();
        let mut totals = BTreeMap::new();
        for expense in &state.expenses {
            *totals.entry(expense.category_id.clone()).or_insert(0.0) += expense.amount;
        }
        totals
    }

    /// Filtered, stably sorted copy of the expense list.
    pub fn filter_and_sort(&self, query: &ExpenseQuery) -> Vec<Expense> {
        let needle = query
            .text_filter
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase);
        let category = query.category_id.as_deref().filter(|id| !id.is_empty());

        let mut matches: Vec<Expense> = self
            .read()
            .expenses
            .iter()
            .filter(|expense| {
                needle
                    .as_deref()
                    .map_or(true, |needle| expense.description.to_lowercase().contains(needle))
            })
            .filter(|expense| category.map_or(true, |id| expense.category_id == id))
            .cloned()
            .collect();

        sort_expenses(&mut matches, query.effective_sort_key());
        matches
    }
}

/// Stable sort; unparseable dates order before every real date.
fn sort_expenses(expenses: &mut Vec<Expense>, sort_key: SortKey) {
    match sort_key {
        SortKey::AmountAsc => expenses.sort_by(|a, b| a.amount.total_cmp(&b.amount)),
        SortKey::AmountDesc => expenses.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
        SortKey::DateAsc | SortKey::DateDesc => {
            let mut keyed: Vec<_> = expenses
                .drain(..)
                .map(|expense| (parse_expense_instant(&expense.date), expense))
                .collect();
            if sort_key == SortKey::DateAsc {
                keyed.sort_by(|a, b| a.0.cmp(&b.0));
            } else {
                keyed.sort_by(|a, b| b.0.cmp(&a.0));
            }
            expenses.extend(keyed.into_iter().map(|(_, expense)| expense));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::SteppingClock;
    use crate::storage::test_utils::{FailingProvider, GatedProvider, StaticProvider};
    use chrono::{TimeZone, Utc};
    use shared::SeedData;
    use tokio::sync::Notify;

    fn create_test_expense(
        id: &str,
        amount: f64,
        description: &str,
        date: &str,
        category_id: &str,
    ) -> Expense {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Expense {
            id: id.to_string(),
            amount,
            description: description.to_string(),
            date: date.to_string(),
            category_id: category_id.to_string(),
            receipt_url: None,
            notes: None,
            is_recurring: false,
            tags: Vec::new(),
            created_at: created,
            updated_at: created,
        }
    }

    fn create_test_category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            color: "#10B981".to_string(),
            icon: "ShoppingBag".to_string(),
            budget: None,
        }
    }

    fn empty_store() -> ExpenseStore {
        let clock = SteppingClock::starting_at(Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap());
        ExpenseStore::with_clock(Arc::new(StaticProvider(SeedData::default())), Arc::new(clock))
    }

    async fn seeded_store(expenses: Vec<Expense>) -> ExpenseStore {
        let seed = SeedData {
            expenses,
            categories: vec![
                create_test_category("cat1", "Shopping"),
                create_test_category("cat7", "Coffee & Drinks"),
            ],
            recommendations: Vec::new(),
        };
        let clock = SteppingClock::starting_at(Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap());
        let store = ExpenseStore::with_clock(Arc::new(StaticProvider(seed)), Arc::new(clock));
        store.load().await;
        store
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_load_populates_collections() {
        let store = seeded_store(vec![create_test_expense("e1", 10.0, "Coffee", "2024-03-05", "cat7")]).await;

        assert!(store.is_ready());
        assert_eq!(store.expenses().len(), 1);
        assert_eq!(store.categories().len(), 2);
        assert!(store.recommendations().is_empty());
    }

    #[tokio::test]
    async fn test_load_reports_outcome() {
        let seed = SeedData {
            expenses: vec![create_test_expense("e1", 10.0, "Coffee", "2024-03-05", "cat7")],
            categories: vec![create_test_category("cat7", "Coffee & Drinks")],
            recommendations: Vec::new(),
        };
        let store = ExpenseStore::new(Arc::new(StaticProvider(seed)));

        let outcome = store.load().await;
        assert_eq!(
            outcome,
            LoadOutcome::Seeded {
                expenses: 1,
                categories: 1,
                recommendations: 0
            }
        );
    }

    #[tokio::test]
    async fn test_failed_load_is_ready_and_empty() {
        let store = ExpenseStore::new(Arc::new(FailingProvider));
        store
            .add(create_test_expense("early", 5.0, "Added before load", "2024-03-01", "cat1"))
            .unwrap();

        let outcome = store.load().await;

        assert!(matches!(outcome, LoadOutcome::Failed(msg) if msg.contains("backend unreachable")));
        assert!(store.is_ready());
        assert!(store.expenses().is_empty());
        assert!(store.categories().is_empty());
        assert!(store.recommendations().is_empty());
    }

    #[tokio::test]
    async fn test_reads_during_pending_load_see_empty_state() {
        let gate = Arc::new(Notify::new());
        let seed = SeedData {
            expenses: vec![create_test_expense("e1", 10.0, "Coffee", "2024-03-05", "cat7")],
            categories: vec![create_test_category("cat7", "Coffee & Drinks")],
            recommendations: Vec::new(),
        };
        let store = ExpenseStore::new(Arc::new(GatedProvider { gate: gate.clone(), seed }));

        let loader = store.clone();
        let handle = tokio::spawn(async move { loader.load().await });
        tokio::task::yield_now().await;

        assert!(!store.is_ready());
        assert!(store.expenses().is_empty());
        assert_eq!(store.monthly_total(date(2024, 3, 15)), 0.0);
        assert!(store.totals_by_category().is_empty());
        assert!(store.category_of("cat7").is_none());

        gate.notify_one();
        handle.await.unwrap();

        assert!(store.is_ready());
        assert_eq!(store.expenses().len(), 1);
        assert!(store.category_of("cat7").is_some());
    }

    #[tokio::test]
    async fn test_not_ready_before_first_load() {
        let store = empty_store();
        assert!(!store.is_ready());
        assert!(store.expenses().is_empty());
    }

    #[test]
    fn test_add_then_get_returns_exact_fields() {
        let store = empty_store();
        let expense = create_test_expense("e1", 42.5, "New Shoes", "2024-03-05", "cat9");

        store.add(expense.clone()).unwrap();

        assert_eq!(store.get("e1"), Some(expense));
    }

    #[test]
    fn test_add_inserts_at_front() {
        let store = empty_store();
        store.add(create_test_expense("e1", 1.0, "First", "2024-03-01", "cat1")).unwrap();
        store.add(create_test_expense("e2", 2.0, "Second", "2024-02-01", "cat1")).unwrap();

        let ids: Vec<_> = store.expenses().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["e2", "e1"]);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let store = empty_store();
        store.add(create_test_expense("e1", 1.0, "First", "2024-03-01", "cat1")).unwrap();

        let result = store.add(create_test_expense("e1", 9.0, "Again", "2024-03-02", "cat1"));

        assert_eq!(result, Err(ExpenseValidationError::DuplicateId("e1".to_string())));
        assert_eq!(store.expenses().len(), 1);
        assert_eq!(store.get("e1").unwrap().amount, 1.0);
    }

    #[test]
    fn test_add_rejects_negative_amount() {
        let store = empty_store();
        let result = store.add(create_test_expense("e1", -3.0, "Refund", "2024-03-01", "cat1"));
        assert_eq!(result, Err(ExpenseValidationError::NegativeAmount(-3.0)));
        assert!(store.expenses().is_empty());
    }

    #[test]
    fn test_create_assigns_id_and_timestamps() {
        let store = empty_store();
        let command = CreateExpenseCommand {
            amount: 25.0,
            description: "Groceries".to_string(),
            date: "2024-03-15".to_string(),
            category_id: "cat1".to_string(),
            ..Default::default()
        };

        let created = store.create(command).unwrap();

        assert!(Expense::parse_id(&created.id).is_ok());
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.created_at, Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap());
        assert_eq!(store.get(&created.id), Some(created));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = empty_store();
        store.add(create_test_expense("e1", 1.0, "First", "2024-03-01", "cat1")).unwrap();
        store.add(create_test_expense("e2", 2.0, "Second", "2024-03-02", "cat1")).unwrap();

        assert!(store.remove("e1"));
        let after_once = store.expenses();
        assert!(!store.remove("e1"));

        assert_eq!(store.expenses(), after_once);
        assert_eq!(after_once.len(), 1);
    }

    #[test]
    fn test_remove_many_skips_unknown_ids() {
        let store = empty_store();
        store.add(create_test_expense("e1", 1.0, "First", "2024-03-01", "cat1")).unwrap();
        store.add(create_test_expense("e2", 2.0, "Second", "2024-03-02", "cat1")).unwrap();
        store.add(create_test_expense("e3", 3.0, "Third", "2024-03-03", "cat1")).unwrap();

        let removed = store.remove_many(&["e1".to_string(), "missing".to_string(), "e3".to_string()]);

        assert_eq!(removed, 2);
        assert_eq!(store.expenses().len(), 1);
        assert!(store.get("e2").is_some());
    }

    #[test]
    fn test_update_preserves_unpatched_fields() {
        let store = empty_store();
        let original = create_test_expense("e1", 10.0, "Lunch", "2024-03-05", "cat4");
        store.add(original.clone()).unwrap();

        let updated = store
            .update(
                "e1",
                ExpensePatch {
                    amount: Some(12.0),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.amount, 12.0);
        assert_eq!(updated.description, original.description);
        assert_eq!(updated.date, original.date);
        assert_eq!(updated.category_id, original.category_id);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);
        assert_eq!(store.get("e1"), Some(updated));
    }

    #[test]
    fn test_update_moves_updated_at_forward_each_time() {
        let store = empty_store();
        store.add(create_test_expense("e1", 10.0, "Lunch", "2024-03-05", "cat4")).unwrap();

        let first = store.update("e1", ExpensePatch::default()).unwrap();
        let second = store.update("e1", ExpensePatch::default()).unwrap();

        assert!(second.updated_at > first.updated_at);
        assert!(second.updated_at >= second.created_at);
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let store = empty_store();
        store.add(create_test_expense("e1", 10.0, "Lunch", "2024-03-05", "cat4")).unwrap();
        let before = store.expenses();

        let result = store.update(
            "missing",
            ExpensePatch {
                amount: Some(99.0),
                ..Default::default()
            },
        );

        assert!(result.is_none());
        assert_eq!(store.expenses(), before);
    }

    #[tokio::test]
    async fn test_category_of() {
        let store = seeded_store(Vec::new()).await;
        assert_eq!(store.category_of("cat1").unwrap().name, "Shopping");
        assert!(store.category_of("deleted").is_none());
    }

    #[test]
    fn test_monthly_total_matches_only_same_month() {
        let store = empty_store();
        store.add(create_test_expense("e1", 50.0, "A", "2024-03-05", "cat1")).unwrap();
        store.add(create_test_expense("e2", 30.0, "B", "2024-03-20", "cat1")).unwrap();
        store.add(create_test_expense("e3", 99.0, "C", "2024-04-01", "cat1")).unwrap();
        store.add(create_test_expense("e4", 7.0, "D", "2023-03-10", "cat1")).unwrap();

        assert_eq!(store.monthly_total(date(2024, 3, 15)), 80.0);
        assert_eq!(store.monthly_total(date(2024, 4, 30)), 99.0);
        assert_eq!(store.monthly_total(date(2024, 5, 1)), 0.0);
        assert_eq!(store.monthly_total(date(2024, 3, 15)), store.monthly_total(date(2024, 3, 15)));
    }

    #[test]
    fn test_monthly_total_ignores_unparseable_dates() {
        let store = empty_store();
        store.add(create_test_expense("e1", 50.0, "A", "2024-03-05", "cat1")).unwrap();
        store.add(create_test_expense("e2", 30.0, "B", "sometime in March", "cat1")).unwrap();

        assert_eq!(store.monthly_total(date(2024, 3, 1)), 50.0);
    }

    #[test]
    fn test_totals_by_category_partitions_all_expenses() {
        let store = empty_store();
        store.add(create_test_expense("e1", 50.0, "A", "2024-03-05", "cat1")).unwrap();
        store.add(create_test_expense("e2", 30.0, "B", "2024-02-20", "cat1")).unwrap();
        store.add(create_test_expense("e3", 4.5, "C", "2024-04-01", "cat7")).unwrap();
        store.add(create_test_expense("e4", 12.25, "D", "2024-04-02", "gone")).unwrap();

        let totals = store.totals_by_category();

        assert_eq!(totals.len(), 3);
        assert_eq!(totals["cat1"], 80.0);
        assert_eq!(totals["cat7"], 4.5);
        assert_eq!(totals["gone"], 12.25);

        let bucket_sum: f64 = totals.values().sum();
        let expense_sum: f64 = store.expenses().iter().map(|e| e.amount).sum();
        assert!((bucket_sum - expense_sum).abs() < 1e-9);
    }

    #[test]
    fn test_filter_by_text_sorted_by_amount_desc_is_stable() {
        let store = empty_store();
        store.add(create_test_expense("e1", 4.99, "Starbucks Coffee", "2024-03-01", "cat7")).unwrap();
        store.add(create_test_expense("e2", 3.50, "coffee beans", "2024-03-02", "cat1")).unwrap();
        store.add(create_test_expense("e3", 4.99, "COFFEE to go", "2024-03-03", "cat7")).unwrap();
        store.add(create_test_expense("e4", 60.0, "Groceries", "2024-03-04", "cat1")).unwrap();

        let query = ExpenseQuery::new().with_text("coffee").sorted_by(SortKey::AmountDesc);
        let ids: Vec<_> = store.filter_and_sort(&query).into_iter().map(|e| e.id).collect();

        // Insertion order is e4, e3, e2, e1; the two 4.99 entries keep it.
        assert_eq!(ids, vec!["e3", "e1", "e2"]);
    }

    #[test]
    fn test_filter_by_category() {
        let store = empty_store();
        store.add(create_test_expense("e1", 4.99, "Starbucks Coffee", "2024-03-01", "cat7")).unwrap();
        store.add(create_test_expense("e2", 60.0, "Groceries", "2024-03-04", "cat1")).unwrap();

        let query = ExpenseQuery::new().with_category("cat1");
        let results = store.filter_and_sort(&query);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "e2");
    }

    #[test]
    fn test_text_and_category_filters_must_both_match() {
        let store = empty_store();
        store.add(create_test_expense("e1", 4.99, "Starbucks Coffee", "2024-03-01", "cat7")).unwrap();
        store.add(create_test_expense("e2", 3.50, "coffee beans", "2024-03-02", "cat1")).unwrap();
        store.add(create_test_expense("e3", 6.25, "Iced coffee", "2024-03-03", "cat7")).unwrap();
        store.add(create_test_expense("e4", 2.75, "Bubble tea", "2024-03-04", "cat7")).unwrap();

        let query = ExpenseQuery::new()
            .with_text("coffee")
            .with_category("cat7")
            .sorted_by(SortKey::AmountAsc);
        let ids: Vec<_> = store.filter_and_sort(&query).into_iter().map(|e| e.id).collect();

        // e2 matches only the text, e4 only the category
        assert_eq!(ids, vec!["e1", "e3"]);
    }

    #[test]
    fn test_empty_filters_match_everything() {
        let store = empty_store();
        store.add(create_test_expense("e1", 4.99, "Starbucks Coffee", "2024-03-01", "cat7")).unwrap();
        store.add(create_test_expense("e2", 60.0, "Groceries", "2024-03-04", "cat1")).unwrap();

        let query = ExpenseQuery::new().with_text("").with_category("");
        assert_eq!(store.filter_and_sort(&query).len(), 2);
    }

    #[test]
    fn test_default_sort_is_date_desc() {
        let store = empty_store();
        store.add(create_test_expense("e1", 1.0, "A", "2024-03-10", "cat1")).unwrap();
        store.add(create_test_expense("e2", 2.0, "B", "2024-03-01", "cat1")).unwrap();
        store.add(create_test_expense("e3", 3.0, "C", "2024-03-20", "cat1")).unwrap();

        let ids: Vec<_> = store.filter_and_sort(&ExpenseQuery::new()).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["e3", "e1", "e2"]);
    }

    #[test]
    fn test_date_asc_with_ties_and_bad_dates() {
        let store = empty_store();
        store.add(create_test_expense("e1", 1.0, "A", "2024-03-10", "cat1")).unwrap();
        store.add(create_test_expense("e2", 2.0, "B", "2024-03-10", "cat1")).unwrap();
        store.add(create_test_expense("e3", 3.0, "C", "unknown", "cat1")).unwrap();
        store.add(create_test_expense("e4", 4.0, "D", "2024-03-01T08:30:00", "cat1")).unwrap();

        let query = ExpenseQuery::new().sorted_by(SortKey::DateAsc);
        let ids: Vec<_> = store.filter_and_sort(&query).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["e3", "e4", "e2", "e1"]);
    }

    #[test]
    fn test_amount_asc() {
        let store = empty_store();
        store.add(create_test_expense("e1", 10.0, "A", "2024-03-10", "cat1")).unwrap();
        store.add(create_test_expense("e2", 2.0, "B", "2024-03-10", "cat1")).unwrap();
        store.add(create_test_expense("e3", 5.0, "C", "2024-03-10", "cat1")).unwrap();

        let query = ExpenseQuery::new().sorted_by(SortKey::AmountAsc);
        let amounts: Vec<_> = store.filter_and_sort(&query).into_iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![2.0, 5.0, 10.0]);
    }

    #[test]
    fn test_filter_and_sort_does_not_reorder_store() {
        let store = empty_store();
        store.add(create_test_expense("e1", 10.0, "A", "2024-03-01", "cat1")).unwrap();
        store.add(create_test_expense("e2", 2.0, "B", "2024-03-10", "cat1")).unwrap();
        let before = store.expenses();

        store.filter_and_sort(&ExpenseQuery::new().sorted_by(SortKey::AmountAsc));

        assert_eq!(store.expenses(), before);
    }
}
