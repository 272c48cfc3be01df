//! Report generation service.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tally_shared::ReportConfig;
use tracing::debug;

use super::error::ReportError;
use super::types::{BalanceStatement, CategoryCost, CostsByCategory, IncomeStatement};
use crate::identity::User;
use crate::ledger::{LedgerQueries, OperationKind, TransactionFilter, TransactionView};

/// Builds statements from the ledger. Never mutates anything.
pub struct ReportEngine {
    ledger: LedgerQueries,
    labels: ReportConfig,
}

impl ReportEngine {
    /// Creates an engine with the given row labels.
    pub fn new(ledger: LedgerQueries, labels: ReportConfig) -> Self {
        Self { ledger, labels }
    }

    /// Current balance of the owner, dated today.
    ///
    /// # Errors
    ///
    /// Returns a store error if the backend fails.
    pub fn get_current_balance(&self, owner: &User) -> Result<BalanceStatement, ReportError> {
        Ok(BalanceStatement {
            as_of: Utc::now().date_naive(),
            owner_id: owner.id,
            owner: owner.name.clone(),
            balance: self.ledger.balance(owner.id)?,
        })
    }

    /// Deposits and withdrawals of the owner within `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` if `from` is after `to`.
    pub fn get_income_statement(
        &self,
        owner: &User,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<IncomeStatement, ReportError> {
        validate_range(from, to)?;
        let totals = self
            .ledger
            .totals(&TransactionFilter::for_owner(owner.id).between(from, to))?;

        debug!(owner_id = %owner.id, %from, %to, "Income statement built");

        Ok(IncomeStatement {
            from,
            to,
            income: totals.deposits,
            outcome: totals.withdrawals,
            total: totals.balance(),
        })
    }

    /// Withdrawals of the owner within `[from, to]`, grouped by category name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` if `from` is after `to`.
    pub fn get_costs_by_category(
        &self,
        owner: &User,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<CostsByCategory, ReportError> {
        validate_range(from, to)?;
        let filter = TransactionFilter::for_owner(owner.id)
            .between(from, to)
            .kind(OperationKind::Withdraw);

        let views = self
            .ledger
            .find(&filter)?
            .iter()
            .map(|t| self.ledger.to_view(t))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            owner_id = %owner.id,
            %from,
            %to,
            transactions = views.len(),
            "Costs by category built"
        );

        Ok(CostsByCategory {
            from,
            to,
            rows: group_costs(&views, &self.labels),
        })
    }
}

/// Groups withdrawals by category name and appends the grand total row.
#[must_use]
pub fn group_costs(views: &[TransactionView], labels: &ReportConfig) -> Vec<CategoryCost> {
    let mut groups: BTreeMap<&str, Decimal> = BTreeMap::new();
    for view in views {
        let name = view
            .category_name
            .as_deref()
            .unwrap_or(&labels.no_category_label);
        *groups.entry(name).or_default() += view.amount;
    }

    let grand_total: Decimal = groups.values().copied().sum();
    let mut rows: Vec<CategoryCost> = groups
        .into_iter()
        .map(|(category, amount)| CategoryCost {
            category: category.to_string(),
            amount,
        })
        .collect();
    rows.push(CategoryCost {
        category: labels.grand_total_label.clone(),
        amount: grand_total,
    });
    rows
}

fn validate_range(from: NaiveDate, to: NaiveDate) -> Result<(), ReportError> {
    if from > to {
        return Err(ReportError::InvalidDateRange {
            start: from,
            end: to,
        });
    }
    Ok(())
}
