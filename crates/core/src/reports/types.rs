//! Report data types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::UserId;

/// Current balance of one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceStatement {
    /// Date the statement was produced.
    pub as_of: NaiveDate,
    /// Owner ID.
    pub owner_id: UserId,
    /// Owner display name.
    pub owner: String,
    /// Deposits minus withdrawals over all transactions.
    pub balance: Decimal,
}

/// Income and outcome over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// First day (inclusive).
    pub from: NaiveDate,
    /// Last day (inclusive).
    pub to: NaiveDate,
    /// Sum of deposits.
    pub income: Decimal,
    /// Sum of withdrawals.
    pub outcome: Decimal,
    /// `income - outcome`.
    pub total: Decimal,
}

/// One group of the cost-by-category statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCost {
    /// Category name, or a configured label.
    pub category: String,
    /// Sum of withdrawals in the group.
    pub amount: Decimal,
}

/// Withdrawals grouped by category over an inclusive date range.
///
/// Rows are sorted by category name; the last row is the synthetic grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostsByCategory {
    /// First day (inclusive).
    pub from: NaiveDate,
    /// Last day (inclusive).
    pub to: NaiveDate,
    /// Category rows followed by the total row.
    pub rows: Vec<CategoryCost>,
}

impl CostsByCategory {
    /// Amount of the grand total row.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.rows.last().map_or(Decimal::ZERO, |row| row.amount)
    }

    /// Keyed view of every row, the grand total included.
    #[must_use]
    pub fn as_map(&self) -> BTreeMap<String, Decimal> {
        self.rows
            .iter()
            .map(|row| (row.category.clone(), row.amount))
            .collect()
    }
}
