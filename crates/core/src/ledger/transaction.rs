//! Transaction aggregate.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{CategoryId, TransactionId, UserId};

/// Direction of money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationKind {
    /// Money coming in (increases the balance).
    Deposit,
    /// Money going out (decreases the balance).
    Withdraw,
}

impl OperationKind {
    /// Returns the upper-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Withdraw => "WITHDRAW",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ledger transaction.
///
/// `date`, `kind` and `owner_id` are fixed at creation; only `category_id`,
/// `amount` and `description` change on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier (`UNSET` until persisted).
    pub id: TransactionId,
    /// Transaction date.
    pub date: NaiveDate,
    /// Deposit or withdrawal.
    pub kind: OperationKind,
    /// Optional category reference.
    pub category_id: Option<CategoryId>,
    /// Amount, always positive.
    pub amount: Decimal,
    /// Free-text description.
    pub description: String,
    /// Owning user.
    pub owner_id: UserId,
}

/// Largest amount a single transaction, budget or goal may carry.
///
/// Keeps every per-owner aggregate far below the `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

impl Transaction {
    /// Returns true for withdrawals.
    #[must_use]
    pub fn is_withdrawal(&self) -> bool {
        self.kind == OperationKind::Withdraw
    }
}
