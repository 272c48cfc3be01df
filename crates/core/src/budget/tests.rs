//! Budget tracker tests.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use rstest::rstest;
use tally_shared::types::BudgetId;

use super::error::BudgetError;
use super::service::utilization;
use crate::category::CategoryError;
use crate::ledger::{MAX_AMOUNT, OperationKind};
use crate::period::Period;
use crate::testing::{Harness, date};

fn january() -> Period {
    Period::new(2025, 1).unwrap()
}

#[test]
fn test_add_budget_upserts_on_triple() {
    let h = Harness::new();
    let food = h.services.categories.add_category(&h.alice, "Food").unwrap();

    let first = h
        .services
        .budgets
        .add_budget(&h.alice, food.id, january(), dec!(150))
        .unwrap();
    let second = h
        .services
        .budgets
        .add_budget(&h.alice, food.id, january(), dec!(300))
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.amount, dec!(300));
    assert_eq!(h.services.budgets.list_budgets(&h.alice).unwrap().len(), 1);
}

#[test]
fn test_add_budget_for_foreign_category_is_not_found() {
    let h = Harness::new();
    let food = h.services.categories.add_category(&h.alice, "Food").unwrap();

    let err = h
        .services
        .budgets
        .add_budget(&h.bob, food.id, january(), dec!(10))
        .unwrap_err();

    assert!(matches!(err, BudgetError::Category(CategoryError::NotFound(_))));
}

#[rstest]
#[case(dec!(0))]
#[case(dec!(-5))]
fn test_non_positive_budget_rejected(#[case] amount: Decimal) {
    let h = Harness::new();
    let food = h.services.categories.add_category(&h.alice, "Food").unwrap();

    assert!(matches!(
        h.services.budgets.add_budget(&h.alice, food.id, january(), amount),
        Err(BudgetError::NonPositiveAmount)
    ));
}

#[test]
fn test_budget_above_maximum_rejected() {
    let h = Harness::new();
    let food = h.services.categories.add_category(&h.alice, "Food").unwrap();

    let err = h
        .services
        .budgets
        .add_budget(&h.alice, food.id, january(), MAX_AMOUNT + dec!(0.01))
        .unwrap_err();

    assert!(matches!(err, BudgetError::AmountTooLarge(_)));
    assert!(h.services.budgets.list_budgets(&h.alice).unwrap().is_empty());
    h.services
        .budgets
        .add_budget(&h.alice, food.id, january(), MAX_AMOUNT)
        .unwrap();
}

#[test]
fn test_tiny_budget_with_huge_spending_still_reports() {
    let h = Harness::new();
    let food = h.services.categories.add_category(&h.alice, "Food").unwrap();
    h.services
        .budgets
        .add_budget(&h.alice, food.id, january(), dec!(0.0001))
        .unwrap();

    for day in 1..=3 {
        h.record(&h.alice, OperationKind::Withdraw, MAX_AMOUNT, date(2025, 1, day), Some("Food"));
    }

    let report = h.services.budgets.get_budget_report(&h.alice, january()).unwrap();
    assert_eq!(report.rows[0].spent, MAX_AMOUNT * dec!(3));
    assert_eq!(report.rows[0].utilization_pct, dec!(3000000000000000000));
    assert_eq!(h.notifier.sent().len(), 3);
}

#[test]
fn test_foreign_budget_is_not_found() {
    let h = Harness::new();
    let food = h.services.categories.add_category(&h.alice, "Food").unwrap();
    let budget = h
        .services
        .budgets
        .add_budget(&h.alice, food.id, january(), dec!(10))
        .unwrap();

    assert!(matches!(
        h.services.budgets.get_budget(budget.id, &h.bob),
        Err(BudgetError::NotFound(_))
    ));
    assert!(matches!(
        h.services.budgets.delete_budget(budget.id, &h.bob),
        Err(BudgetError::NotFound(_))
    ));
    assert!(matches!(
        h.services.budgets.delete_budget(BudgetId::new(99), &h.alice),
        Err(BudgetError::NotFound(_))
    ));

    h.services.budgets.delete_budget(budget.id, &h.alice).unwrap();
    assert!(h.services.budgets.list_budgets(&h.alice).unwrap().is_empty());
}

#[test]
fn test_report_sums_month_withdrawals_only() {
    let h = Harness::new();
    let food = h.services.categories.add_category(&h.alice, "Food").unwrap();
    let rent = h.services.categories.add_category(&h.alice, "Rent").unwrap();
    h.services
        .budgets
        .add_budget(&h.alice, food.id, january(), dec!(200))
        .unwrap();
    h.services
        .budgets
        .add_budget(&h.alice, rent.id, january(), dec!(800))
        .unwrap();

    h.record(&h.alice, OperationKind::Withdraw, dec!(50), date(2025, 1, 1), Some("Food"));
    h.record(&h.alice, OperationKind::Withdraw, dec!(25), date(2025, 1, 31), Some("Food"));
    h.record(&h.alice, OperationKind::Withdraw, dec!(99), date(2025, 2, 1), Some("Food"));
    h.record(&h.alice, OperationKind::Deposit, dec!(500), date(2025, 1, 5), Some("Food"));
    h.record(&h.alice, OperationKind::Withdraw, dec!(800), date(2025, 1, 3), Some("Rent"));

    let report = h.services.budgets.get_budget_report(&h.alice, january()).unwrap();

    assert_eq!(report.owner, "Alice");
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].category, "Food");
    assert_eq!(report.rows[0].spent, dec!(75));
    assert_eq!(report.rows[0].utilization_pct, dec!(37.50));
    assert_eq!(report.rows[1].utilization_pct, dec!(100));
    assert_eq!(report.total.planned, dec!(1000));
    assert_eq!(report.total.spent, dec!(875));
    assert_eq!(report.total.utilization_pct, dec!(87.50));
}

#[test]
fn test_report_without_budgets_is_empty() {
    let h = Harness::new();
    let report = h.services.budgets.get_budget_report(&h.alice, january()).unwrap();

    assert!(report.is_empty());
    assert_eq!(report.total.utilization_pct, Decimal::ZERO);
}

#[test]
fn test_overrun_triggers_at_equality() {
    let h = Harness::new();
    let bills = h.services.categories.add_category(&h.alice, "Bills").unwrap();
    h.services
        .budgets
        .add_budget(&h.alice, bills.id, january(), dec!(1000))
        .unwrap();

    h.record(&h.alice, OperationKind::Withdraw, dec!(400), date(2025, 1, 2), Some("Bills"));
    assert!(h.notifier.sent().is_empty());

    let last = h.record(
        &h.alice,
        OperationKind::Withdraw,
        dec!(600),
        date(2025, 1, 20),
        Some("Bills"),
    );
    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].address, "alice@example.com");

    let tx = crate::ledger::Transaction {
        id: last.id,
        date: last.date,
        kind: last.operation_kind,
        category_id: Some(bills.id),
        amount: last.amount,
        description: last.description,
        owner_id: h.alice.id,
    };
    let overrun = h.services.budgets.check_budget(&tx).unwrap().unwrap();
    assert_eq!(overrun.overrun, Decimal::ZERO);
    assert!(overrun.message().contains("'Bills'"));
}

#[test]
fn test_deposits_and_uncategorized_never_checked() {
    let h = Harness::new();
    let bills = h.services.categories.add_category(&h.alice, "Bills").unwrap();
    h.services
        .budgets
        .add_budget(&h.alice, bills.id, january(), dec!(1))
        .unwrap();

    h.record(&h.alice, OperationKind::Deposit, dec!(50), date(2025, 1, 2), Some("Bills"));
    h.record(&h.alice, OperationKind::Withdraw, dec!(50), date(2025, 1, 2), None);

    assert!(h.notifier.sent().is_empty());
}

#[rstest]
#[case(dec!(75), dec!(200), dec!(37.50))]
#[case(dec!(1), dec!(3), dec!(33.33))]
#[case(dec!(2), dec!(3), dec!(66.67))]
#[case(dec!(1000), dec!(1000), dec!(100))]
#[case(dec!(1250), dec!(1000), dec!(125))]
#[case(dec!(0), dec!(500), dec!(0))]
#[case(dec!(10), dec!(0), dec!(0))]
#[case(dec!(0), dec!(0), dec!(0))]
fn test_utilization_known_values(
    #[case] spent: Decimal,
    #[case] planned: Decimal,
    #[case] expected: Decimal,
) {
    assert_eq!(utilization(spent, planned), expected);
}

#[test]
fn test_utilization_saturates() {
    assert_eq!(utilization(Decimal::MAX, dec!(0.0001)), Decimal::MAX);
}

proptest! {
    /// Spending more against the same plan never lowers utilization.
    #[test]
    fn prop_utilization_monotonic_in_spent(
        spent in 0i64..10_000_000,
        extra in 0i64..10_000_000,
        planned in 1i64..10_000_000,
    ) {
        let planned = Decimal::new(planned, 2);
        let low = utilization(Decimal::new(spent, 2), planned);
        let high = utilization(Decimal::new(spent + extra, 2), planned);

        prop_assert!(low <= high);
        prop_assert!(low >= Decimal::ZERO);
        prop_assert!(high.scale() <= 2);
    }
}
