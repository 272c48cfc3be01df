//! Tally sandbox
//!
//! Wires the core against the in-memory store, replays one demo month and prints
//! every statement as JSON.

use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::Services;
use tally_core::goal::GoalInput;
use tally_core::identity::User;
use tally_core::ledger::{OperationKind, TransactionFilter, TransactionInput};
use tally_core::period::Period;
use tally_core::store::{InMemoryStore, UserStore};
use tally_shared::{
    AppConfig, EmailService, LogNotifier, LoggingConfig, NotificationChannel, Notifier,
};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let notifier: Arc<dyn Notifier> = match config.notification.channel {
        NotificationChannel::Log => Arc::new(LogNotifier),
        NotificationChannel::Smtp => {
            info!(
                smtp_host = %config.notification.email.smtp_host,
                smtp_port = %config.notification.email.smtp_port,
                "Email notifications configured"
            );
            Arc::new(EmailService::new(config.notification.email.clone()))
        }
    };

    let store = Arc::new(InMemoryStore::new());
    let user = store.save_user(User::new("Demo", "demo@tally.local"))?;
    let services = Services::new(store, notifier, config.reports.clone());
    info!(owner_id = %user.id, "Sandbox ready");

    replay_demo_month(&services, &user)?;

    let period = Period::new(2025, 1)?;
    let (from, to) = (period.first_day(), period.last_day());

    let transactions = services
        .ledger
        .get_transactions(&TransactionFilter::for_owner(user.id))?;
    print("transactions", &transactions)?;
    print("balance", &services.reports.get_current_balance(&user)?)?;
    print("income_statement", &services.reports.get_income_statement(&user, from, to)?)?;
    print("costs_by_category", &services.reports.get_costs_by_category(&user, from, to)?)?;
    print("budget_report", &services.budgets.get_budget_report(&user, period)?)?;
    print("goals", &services.goals.goal_progress(&user)?)?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn replay_demo_month(services: &Services, user: &User) -> anyhow::Result<()> {
    let groceries = services.categories.add_category(user, "Groceries")?;
    let rent = services.categories.add_category(user, "Rent")?;
    services.categories.add_category(user, "Leisure")?;

    let january = Period::new(2025, 1)?;
    services.budgets.add_budget(user, groceries.id, january, dec!(150))?;
    services.budgets.add_budget(user, rent.id, january, dec!(900))?;

    services.goals.add_goal(
        user,
        GoalInput {
            name: "Emergency fund".to_string(),
            description: "Three months of rent".to_string(),
            target_amount: dec!(2700),
        },
    )?;

    let entries: [(u32, OperationKind, Decimal, Option<&str>, &str); 6] = [
        (2, OperationKind::Deposit, dec!(10000), None, "Salary"),
        (3, OperationKind::Withdraw, dec!(900), Some("Rent"), "January rent"),
        (10, OperationKind::Withdraw, dec!(84.20), Some("Groceries"), "Market"),
        (15, OperationKind::Withdraw, dec!(116.30), Some("Groceries"), "Supermarket"),
        (18, OperationKind::Withdraw, dec!(45), Some("Leisure"), "Cinema"),
        (27, OperationKind::Withdraw, dec!(12.99), None, "Bank fee"),
    ];

    for (day, kind, amount, category, description) in entries {
        let date = NaiveDate::from_ymd_opt(2025, 1, day).context("invalid demo date")?;
        services.ledger.add_transaction(
            user,
            TransactionInput {
                date,
                kind,
                category_name: category.map(str::to_string),
                amount,
                description: description.to_string(),
            },
        )?;
    }

    Ok(())
}

fn print<T: Serialize>(label: &str, value: &T) -> anyhow::Result<()> {
    println!("{label}: {}", serde_json::to_string_pretty(value)?);
    Ok(())
}
