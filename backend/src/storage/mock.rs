//! # Mock Fixture Provider
//!
//! Built-in demo data: twelve categories, fifteen expenses spread over the
//! thirty days before an anchor date, and three budget recommendations.
//! A fixed delay stands in for network latency.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDate, Utc};
use shared::{BudgetRecommendation, Category, Expense, SeedData};
use std::time::Duration;
use tracing::debug;

use super::traits::FixtureProvider;

pub const DEFAULT_FIXTURE_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone)]
pub struct MockFixtureProvider {
    delay: Duration,
    anchor: Option<NaiveDate>,
}

impl MockFixtureProvider {
    pub fn new(delay: Duration) -> Self {
        Self { delay, anchor: None }
    }

    /// Pin expense dates relative to `anchor` instead of today.
    pub fn anchored_at(mut self, anchor: NaiveDate) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// The seed this provider returns for a given anchor date and creation time.
    pub fn seed_for(anchor: NaiveDate, now: DateTime<Utc>) -> SeedData {
        SeedData {
            expenses: mock_expenses(anchor, now),
            categories: mock_categories(),
            recommendations: mock_recommendations(),
        }
    }
}

impl Default for MockFixtureProvider {
    fn default() -> Self {
        Self::new(DEFAULT_FIXTURE_DELAY)
    }
}

#[async_trait]
impl FixtureProvider for MockFixtureProvider {
    async fn load_seed(&self) -> Result<SeedData> {
        debug!("Simulating fixture latency of {:?}", self.delay);
        tokio::time::sleep(self.delay).await;

        let anchor = self.anchor.unwrap_or_else(|| Local::now().date_naive());
        Ok(Self::seed_for(anchor, Utc::now()))
    }

    fn describe(&self) -> String {
        "mock fixtures".to_string()
    }
}

fn category(id: &str, name: &str, color: &str, icon: &str, budget: Option<f64>) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
        icon: icon.to_string(),
        budget,
    }
}

fn mock_categories() -> Vec<Category> {
    vec![
        category("cat1", "Shopping", "#10B981", "ShoppingBag", None),
        category("cat2", "Housing", "#3B82F6", "Home", None),
        category("cat3", "Transportation", "#F59E0B", "Car", None),
        category("cat4", "Food & Dining", "#EF4444", "Utensils", Some(500.0)),
        category("cat5", "Bills & Utilities", "#8B5CF6", "CreditCard", None),
        category("cat6", "Travel", "#EC4899", "Plane", None),
        category("cat7", "Coffee & Drinks", "#6D28D9", "Coffee", Some(80.0)),
        category("cat8", "Health & Fitness", "#059669", "HeartPulse", None),
        category("cat9", "Clothing", "#D97706", "Shirt", None),
        category("cat10", "Education", "#7C3AED", "GraduationCap", None),
        category("cat11", "Entertainment", "#DC2626", "Tv", Some(150.0)),
        category("cat12", "Gym & Fitness", "#2563EB", "Dumbbell", None),
    ]
}

struct ExpenseFixture {
    amount: f64,
    description: &'static str,
    category_id: &'static str,
    days_ago: i64,
    notes: Option<&'static str>,
    is_recurring: bool,
}

const EXPENSE_FIXTURES: &[ExpenseFixture] = &[
    ExpenseFixture {
        amount: 89.99,
        description: "Groceries at Whole Foods",
        category_id: "cat1",
        days_ago: 0,
        notes: Some("Weekly grocery shopping"),
        is_recurring: false,
    },
    ExpenseFixture {
        amount: 1500.0,
        description: "Monthly Rent",
        category_id: "cat2",
        days_ago: 3,
        notes: None,
        is_recurring: true,
    },
    ExpenseFixture {
        amount: 45.99,
        description: "Gas Station",
        category_id: "cat3",
        days_ago: 5,
        notes: None,
        is_recurring: false,
    },
    ExpenseFixture {
        amount: 65.43,
        description: "Dinner at Olive Garden",
        category_id: "cat4",
        days_ago: 8,
        notes: None,
        is_recurring: false,
    },
    ExpenseFixture {
        amount: 120.50,
        description: "Electricity Bill",
        category_id: "cat5",
        days_ago: 2,
        notes: None,
        is_recurring: true,
    },
    ExpenseFixture {
        amount: 349.99,
        description: "Flight to New York",
        category_id: "cat6",
        days_ago: 12,
        notes: None,
        is_recurring: false,
    },
    ExpenseFixture {
        amount: 4.99,
        description: "Starbucks Coffee",
        category_id: "cat7",
        days_ago: 1,
        notes: None,
        is_recurring: false,
    },
    ExpenseFixture {
        amount: 75.0,
        description: "Doctor Visit",
        category_id: "cat8",
        days_ago: 6,
        notes: Some("Annual checkup"),
        is_recurring: false,
    },
    ExpenseFixture {
        amount: 129.99,
        description: "New Shoes",
        category_id: "cat9",
        days_ago: 14,
        notes: None,
        is_recurring: false,
    },
    ExpenseFixture {
        amount: 299.99,
        description: "Online Course",
        category_id: "cat10",
        days_ago: 20,
        notes: None,
        is_recurring: false,
    },
    ExpenseFixture {
        amount: 19.99,
        description: "Movie Tickets",
        category_id: "cat11",
        days_ago: 9,
        notes: None,
        is_recurring: false,
    },
    ExpenseFixture {
        amount: 55.0,
        description: "Gym Membership",
        category_id: "cat12",
        days_ago: 4,
        notes: None,
        is_recurring: true,
    },
    ExpenseFixture {
        amount: 35.45,
        description: "Lunch at Office",
        category_id: "cat4",
        days_ago: 11,
        notes: None,
        is_recurring: false,
    },
    ExpenseFixture {
        amount: 9.99,
        description: "Streaming Subscription",
        category_id: "cat11",
        days_ago: 25,
        notes: None,
        is_recurring: true,
    },
    ExpenseFixture {
        amount: 150.0,
        description: "Car Service",
        category_id: "cat3",
        days_ago: 17,
        notes: Some("Oil change and inspection"),
        is_recurring: false,
    },
];

fn mock_expenses(anchor: NaiveDate, now: DateTime<Utc>) -> Vec<Expense> {
    EXPENSE_FIXTURES
        .iter()
        .enumerate()
        .map(|(index, fixture)| {
            let date = anchor - ChronoDuration::days(fixture.days_ago);
            Expense {
                id: format!("expense::seed::{:02}", index + 1),
                amount: fixture.amount,
                description: fixture.description.to_string(),
                date: date.format("%Y-%m-%d").to_string(),
                category_id: fixture.category_id.to_string(),
                receipt_url: None,
                notes: fixture.notes.map(str::to_string),
                is_recurring: fixture.is_recurring,
                tags: Vec::new(),
                created_at: now,
                updated_at: now,
            }
        })
        .collect()
}

fn mock_recommendations() -> Vec<BudgetRecommendation> {
    vec![
        BudgetRecommendation {
            id: "rec1".to_string(),
            category_id: "cat7".to_string(),
            recommended_amount: 50.0,
            previous_amount: 80.0,
            reason: "You're spending 37.5% less on coffee than last month. Consider reducing your budget.".to_string(),
            confidence_score: 0.85,
        },
        BudgetRecommendation {
            id: "rec2".to_string(),
            category_id: "cat4".to_string(),
            recommended_amount: 600.0,
            previous_amount: 500.0,
            reason: "Your food expenses consistently exceed your budget by about 20%. Consider a more realistic budget.".to_string(),
            confidence_score: 0.92,
        },
        BudgetRecommendation {
            id: "rec3".to_string(),
            category_id: "cat11".to_string(),
            recommended_amount: 100.0,
            previous_amount: 150.0,
            reason: "Your entertainment spending has decreased over the past 3 months. You could allocate this budget elsewhere.".to_string(),
            confidence_score: 0.78,
        },
    ]
}
