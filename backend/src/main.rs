use anyhow::Result;
use chrono::Local;
use expense_tracker_backend::config::TrackerConfig;
use expense_tracker_backend::domain::{ExpenseQuery, LoadOutcome};
use expense_tracker_backend::initialize_backend;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = TrackerConfig::from_env()?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let app_state = initialize_backend(config);

    if let LoadOutcome::Failed(reason) = app_state.store.load().await {
        warn!("Starting with no data: {}", reason);
    }

    let today = Local::now().date_naive();
    let table = &app_state.expense_table_service;

    let summary = app_state.dashboard_service.monthly_summary(today);
    info!(
        "{}/{}: spent {} ({} vs last month), {} per day",
        summary.month,
        summary.year,
        table.format_currency(summary.total),
        table.format_percent(summary.percent_change),
        table.format_currency(summary.average_per_day)
    );
    if let Some(top) = &summary.top_category {
        info!("Top category: {} at {}", top.name, table.format_currency(top.amount));
    }
    if let Some(budget) = &summary.budget_status {
        info!(
            "Budget: {} of {} used ({})",
            table.format_currency(budget.spent),
            table.format_currency(budget.budget),
            table.format_percent(budget.percent_used)
        );
    }

    for point in app_state
        .dashboard_service
        .monthly_trend(today, app_state.config.trend_months)
    {
        info!("  {} {}: {}", point.label, point.year, table.format_currency(point.amount));
    }

    let recent = app_state.store.filter_and_sort(&ExpenseQuery::new());
    for row in table.format_expenses(&recent[..recent.len().min(5)], &app_state.store) {
        info!(
            "  {} | {} | {} | {}",
            row.formatted_date, row.category_name, row.description, row.formatted_amount
        );
    }

    Ok(())
}
