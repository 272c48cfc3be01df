//! Ledger inputs, views and query descriptors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{CategoryId, TransactionId, UserId};

use super::transaction::{OperationKind, Transaction};
use crate::category::Category;

/// Input for recording a new transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionInput {
    /// Transaction date.
    pub date: NaiveDate,
    /// Deposit or withdrawal.
    pub kind: OperationKind,
    /// Name of one of the owner's categories, if any.
    pub category_name: Option<String>,
    /// Amount, must be positive.
    pub amount: Decimal,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

/// Input for updating the mutable fields of a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionUpdate {
    /// New category name, or `None` to clear the category.
    pub category_name: Option<String>,
    /// New amount, must be positive.
    pub amount: Decimal,
    /// New description.
    #[serde(default)]
    pub description: String,
}

/// Transaction representation returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    /// Transaction ID.
    pub id: TransactionId,
    /// Transaction date.
    pub date: NaiveDate,
    /// Deposit or withdrawal.
    pub operation_kind: OperationKind,
    /// Category name, if categorized.
    pub category_name: Option<String>,
    /// Amount.
    pub amount: Decimal,
    /// Description.
    pub description: String,
    /// Owning user.
    pub owner_id: UserId,
}

impl TransactionView {
    /// Builds the view of a transaction given its resolved category.
    #[must_use]
    pub fn new(transaction: &Transaction, category: Option<&Category>) -> Self {
        Self {
            id: transaction.id,
            date: transaction.date,
            operation_kind: transaction.kind,
            category_name: category.map(|c| c.name.clone()),
            amount: transaction.amount,
            description: transaction.description.clone(),
            owner_id: transaction.owner_id,
        }
    }
}

/// Query descriptor for an owner's transactions.
///
/// Every bound is optional; date bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFilter {
    /// Owner whose transactions are queried.
    pub owner: UserId,
    /// Earliest date (inclusive).
    pub from: Option<NaiveDate>,
    /// Latest date (inclusive).
    pub to: Option<NaiveDate>,
    /// Category to match.
    pub category: Option<CategoryId>,
    /// Operation kind to match.
    pub kind: Option<OperationKind>,
}

impl TransactionFilter {
    /// Creates a filter matching every transaction of the owner.
    #[must_use]
    pub const fn for_owner(owner: UserId) -> Self {
        Self {
            owner,
            from: None,
            to: None,
            category: None,
            kind: None,
        }
    }

    /// Restricts to dates on or after `from`.
    #[must_use]
    pub fn since(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    /// Restricts to dates on or before `to`.
    #[must_use]
    pub fn until(mut self, to: NaiveDate) -> Self {
        self.to = Some(to);
        self
    }

    /// Restricts to dates within `[from, to]`.
    #[must_use]
    pub fn between(self, from: NaiveDate, to: NaiveDate) -> Self {
        self.since(from).until(to)
    }

    /// Restricts to one category.
    #[must_use]
    pub fn category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Restricts to one operation kind.
    #[must_use]
    pub fn kind(mut self, kind: OperationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Returns true if the transaction satisfies every set bound.
    #[must_use]
    pub fn matches(&self, transaction: &Transaction) -> bool {
        transaction.owner_id == self.owner
            && self.from.is_none_or(|from| transaction.date >= from)
            && self.to.is_none_or(|to| transaction.date <= to)
            && self
                .category
                .is_none_or(|category| transaction.category_id == Some(category))
            && self.kind.is_none_or(|kind| transaction.kind == kind)
    }
}
