//! End-to-end tests of the ledger pipeline against the in-memory store.

mod common;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally_core::category::CategoryError;
use tally_core::ledger::{LedgerError, OperationKind, TransactionFilter, TransactionUpdate};
use tally_core::period::Period;
use tally_core::reports::ReportError;
use tally_shared::AppError;

use common::{date, input, world};

/// Deposit 10000 then a 200.50 grocery withdrawal in January 2025.
fn january_world() -> common::World {
    let w = world();
    w.services
        .categories
        .add_category(&w.user, "Groceries")
        .unwrap();
    w.record(OperationKind::Deposit, dec!(10000), date(2025, 1, 10), None);
    w.record(
        OperationKind::Withdraw,
        dec!(200.50),
        date(2025, 1, 15),
        Some("Groceries"),
    );
    w
}

#[test]
fn test_balance_after_deposit_and_withdrawal() {
    let w = january_world();

    assert_eq!(
        w.services.ledger.get_current_balance(&w.user).unwrap(),
        dec!(9799.50)
    );
    let statement = w.services.reports.get_current_balance(&w.user).unwrap();
    assert_eq!(statement.owner, "Ursula");
    assert_eq!(statement.balance, dec!(9799.50));
}

#[test]
fn test_budget_overrun_reported_once() {
    let w = world();
    let groceries = w
        .services
        .categories
        .add_category(&w.user, "Groceries")
        .unwrap();
    w.services
        .budgets
        .add_budget(&w.user, groceries.id, Period::new(2025, 1).unwrap(), dec!(150))
        .unwrap();
    w.record(OperationKind::Deposit, dec!(10000), date(2025, 1, 10), None);
    assert_eq!(w.notifier.count(), 0);

    w.record(
        OperationKind::Withdraw,
        dec!(200.50),
        date(2025, 1, 15),
        Some("Groceries"),
    );

    assert_eq!(w.notifier.count(), 1);
    let sent = w.notifier.last().unwrap();
    assert_eq!(sent.address, "ursula@example.com");
    assert!(sent.body.contains("Groceries"));
    assert!(sent.body.contains("50.50"));
}

#[test]
fn test_costs_by_category() {
    let w = january_world();

    let costs = w
        .services
        .reports
        .get_costs_by_category(&w.user, date(2025, 1, 1), date(2025, 1, 31))
        .unwrap();
    let map = costs.as_map();

    assert_eq!(map.len(), 2);
    assert_eq!(map["Groceries"], dec!(200.50));
    assert_eq!(map["grand total"], dec!(200.50));
    assert_eq!(costs.total(), dec!(200.50));
}

#[test]
fn test_report_labels_cannot_be_category_names() {
    let w = january_world();
    w.record(OperationKind::Withdraw, dec!(9.50), date(2025, 1, 20), None);

    for name in ["grand total", "No category", " GRAND TOTAL "] {
        let err = w.services.categories.add_category(&w.user, name).unwrap_err();
        assert!(matches!(err, CategoryError::ReservedName(_)));
        assert_eq!(AppError::from(err).status_code(), 400);
    }

    let costs = w
        .services
        .reports
        .get_costs_by_category(&w.user, date(2025, 1, 1), date(2025, 1, 31))
        .unwrap();
    let map = costs.as_map();
    assert_eq!(map.len(), 3);
    assert_eq!(map["No category"], dec!(9.50));
    assert_eq!(map["grand total"], dec!(210));
}

#[test]
fn test_income_statement() {
    let w = january_world();

    let statement = w
        .services
        .reports
        .get_income_statement(&w.user, date(2025, 1, 1), date(2025, 1, 31))
        .unwrap();

    assert_eq!(statement.income, dec!(10000));
    assert_eq!(statement.outcome, dec!(200.50));
    assert_eq!(statement.total, dec!(9799.50));
}

#[test]
fn test_reversed_range_rejected() {
    let w = january_world();

    let err = w
        .services
        .reports
        .get_income_statement(&w.user, date(2025, 2, 1), date(2025, 1, 1))
        .unwrap_err();

    assert!(matches!(err, ReportError::InvalidDateRange { .. }));
    assert_eq!(AppError::from(err).status_code(), 400);
}

#[test]
fn test_other_owner_cannot_touch_transaction() {
    let w = january_world();
    let mine = w
        .services
        .ledger
        .get_transactions(&TransactionFilter::for_owner(w.user.id))
        .unwrap();

    for view in &mine {
        let err = w
            .services
            .ledger
            .update_transaction(
                view.id,
                &w.other,
                TransactionUpdate {
                    category_name: None,
                    amount: dec!(1),
                    description: String::new(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::TransactionNotFound(_)));
        assert_eq!(AppError::from(err).status_code(), 404);
    }
    assert_eq!(
        w.services.ledger.get_current_balance(&w.user).unwrap(),
        dec!(9799.50)
    );
}

#[test]
fn test_queries_are_idempotent() {
    let w = january_world();
    let filter =
        TransactionFilter::for_owner(w.user.id).between(date(2025, 1, 1), date(2025, 1, 31));

    let first = w.services.ledger.get_transactions(&filter).unwrap();
    let second = w.services.ledger.get_transactions(&filter).unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[test]
fn test_failed_notification_keeps_transaction() {
    let w = world();
    let bills = w.services.categories.add_category(&w.user, "Bills").unwrap();
    w.services
        .budgets
        .add_budget(&w.user, bills.id, Period::new(2025, 3).unwrap(), dec!(100))
        .unwrap();
    *w.notifier.failing.lock().unwrap() = true;

    let err = w
        .services
        .ledger
        .add_transaction(
            &w.user,
            input(OperationKind::Withdraw, dec!(120), date(2025, 3, 4), Some("Bills")),
        )
        .unwrap_err();

    assert!(err.is_committed());
    assert!(matches!(
        AppError::from(err),
        AppError::ExternalService(_)
    ));
    assert_eq!(
        w.services.ledger.get_current_balance(&w.user).unwrap(),
        dec!(-120)
    );
}

#[test]
fn test_delete_recomputes_budget_and_goal() {
    let w = world();
    let bills = w.services.categories.add_category(&w.user, "Bills").unwrap();
    w.services
        .budgets
        .add_budget(&w.user, bills.id, Period::new(2025, 1).unwrap(), dec!(100))
        .unwrap();
    let first = w.record(OperationKind::Withdraw, dec!(60), date(2025, 1, 2), Some("Bills"));
    w.record(OperationKind::Withdraw, dec!(60), date(2025, 1, 3), Some("Bills"));
    assert_eq!(w.notifier.count(), 1);

    w.services.ledger.delete_transaction(first.id, &w.user).unwrap();

    assert_eq!(w.notifier.count(), 1);
    let report = w
        .services
        .budgets
        .get_budget_report(&w.user, Period::new(2025, 1).unwrap())
        .unwrap();
    assert_eq!(report.rows[0].spent, dec!(60));
}

#[test]
fn test_category_in_use_cannot_be_deleted() {
    let w = january_world();
    let groceries = w
        .services
        .categories
        .get_by_name("Groceries", &w.user)
        .unwrap();

    let err = w
        .services
        .categories
        .delete_category(groceries.id, &w.user)
        .unwrap_err();

    assert!(matches!(err, CategoryError::InUse { transactions: 1, budgets: 0, .. }));
    assert_eq!(AppError::from(err).status_code(), 409);
}

#[test]
fn test_goal_reported_on_each_mutation_above_target() {
    let w = world();
    w.services
        .goals
        .add_goal(
            &w.user,
            tally_core::goal::GoalInput {
                name: "Emergency fund".to_string(),
                description: String::new(),
                target_amount: dec!(5000),
            },
        )
        .unwrap();

    w.record(OperationKind::Deposit, dec!(4999.99), date(2025, 1, 1), None);
    assert_eq!(w.notifier.count(), 0);

    w.record(OperationKind::Deposit, dec!(0.01), date(2025, 1, 2), None);
    w.record(OperationKind::Deposit, dec!(1), date(2025, 1, 3), None);

    assert_eq!(w.notifier.count(), 2);
    assert_eq!(w.notifier.last().unwrap().subject, "Goals achieved");
    assert_eq!(
        w.services.goals.goal_progress(&w.user).unwrap()[0].remaining,
        Decimal::ZERO
    );
}
