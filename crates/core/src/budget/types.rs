//! Budget data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{BudgetId, CategoryId, UserId};

use crate::period::Period;

/// A monthly spending limit for one category.
///
/// At most one budget exists per (owner, category, period).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Month the limit applies to.
    pub period: Period,
    /// Budgeted category.
    pub category_id: CategoryId,
    /// Owning user.
    pub owner_id: UserId,
    /// Spending limit, always positive.
    pub amount: Decimal,
}

/// Budget representation returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetView {
    /// Budget ID.
    pub id: BudgetId,
    /// Month the limit applies to.
    pub period: Period,
    /// Budgeted category.
    pub category_id: CategoryId,
    /// Owning user.
    pub owner_id: UserId,
    /// Spending limit.
    pub amount: Decimal,
}

impl From<&Budget> for BudgetView {
    fn from(budget: &Budget) -> Self {
        Self {
            id: budget.id,
            period: budget.period,
            category_id: budget.category_id,
            owner_id: budget.owner_id,
            amount: budget.amount,
        }
    }
}

/// One category line of a budget report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReportRow {
    /// Category name.
    pub category: String,
    /// Budgeted amount.
    pub planned: Decimal,
    /// Withdrawals in the category during the period.
    pub spent: Decimal,
    /// `spent / planned * 100`, two decimal places.
    pub utilization_pct: Decimal,
}

/// Totals line of a budget report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReportTotal {
    /// Sum of planned amounts.
    pub planned: Decimal,
    /// Sum of spent amounts.
    pub spent: Decimal,
    /// `spent / planned * 100`, two decimal places.
    pub utilization_pct: Decimal,
}

/// Planned versus actual spending for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReport {
    /// Reported month.
    pub period: Period,
    /// Owner ID.
    pub owner_id: UserId,
    /// Owner display name.
    pub owner: String,
    /// One row per budget.
    pub rows: Vec<BudgetReportRow>,
    /// Running totals.
    pub total: BudgetReportTotal,
}

impl BudgetReport {
    /// Returns true if the owner has no budget for the period.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A budget whose category spending met or exceeded its limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverrun {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub category: String,
    /// Month of the budget.
    pub period: Period,
    /// Budgeted amount.
    pub planned: Decimal,
    /// Withdrawals in the category during the period.
    pub spent: Decimal,
    /// `spent - planned`, zero when the limit is met exactly.
    pub overrun: Decimal,
}

impl BudgetOverrun {
    /// Human-readable overrun message.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Budget for category '{}' in {} exceeded by {} (spent {} of {})",
            self.category, self.period, self.overrun, self.spent, self.planned
        )
    }
}
