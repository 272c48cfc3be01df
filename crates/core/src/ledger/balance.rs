//! Balance aggregation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::{OperationKind, Transaction};

/// Running deposit and withdrawal totals over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Sum of deposit amounts.
    pub deposits: Decimal,
    /// Sum of withdrawal amounts.
    pub withdrawals: Decimal,
}

impl LedgerTotals {
    /// Adds a transaction to the totals.
    pub fn add(&mut self, transaction: &Transaction) {
        match transaction.kind {
            OperationKind::Deposit => self.deposits += transaction.amount,
            OperationKind::Withdraw => self.withdrawals += transaction.amount,
        }
    }

    /// Net balance: deposits minus withdrawals.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.deposits - self.withdrawals
    }
}

impl<'a> FromIterator<&'a Transaction> for LedgerTotals {
    fn from_iter<I: IntoIterator<Item = &'a Transaction>>(iter: I) -> Self {
        let mut totals = Self::default();
        for transaction in iter {
            totals.add(transaction);
        }
        totals
    }
}

/// Sums withdrawal amounts.
pub fn total_withdrawn<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Decimal {
    transactions
        .into_iter()
        .filter(|t| t.is_withdrawal())
        .map(|t| t.amount)
        .sum()
}
