//! Budget tracker.

use std::sync::Arc;

use rust_decimal::Decimal;
use tally_shared::types::{BudgetId, CategoryId};
use tally_shared::{AppError, Notifier};
use tracing::{debug, info, warn};

use super::error::BudgetError;
use super::types::{
    Budget, BudgetOverrun, BudgetReport, BudgetReportRow, BudgetReportTotal, BudgetView,
};
use crate::category::CategoryRegistry;
use crate::events::{LedgerEvent, LedgerSubscriber};
use crate::identity::User;
use crate::ledger::{LedgerQueries, MAX_AMOUNT, Transaction};
use crate::period::Period;
use crate::store::{BudgetStore, UserStore};

const OVERRUN_SUBJECT: &str = "Budget exceeded";

/// `spent / planned * 100` rounded to two decimal places, zero when nothing is
/// planned. Saturates at `Decimal::MAX` instead of overflowing.
#[must_use]
pub fn utilization(spent: Decimal, planned: Decimal) -> Decimal {
    if planned.is_zero() {
        return Decimal::ZERO;
    }
    spent
        .checked_div(planned)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
        .round_dp(2)
}

/// Owns per-(owner, category, period) spending limits and evaluates overruns.
///
/// Spending is always recomputed from the ledger. The read in
/// [`BudgetTracker::check_budget`] is not isolated from concurrent mutations of
/// the same owner, so two racing withdrawals can both miss an overrun.
pub struct BudgetTracker {
    budgets: Arc<dyn BudgetStore>,
    users: Arc<dyn UserStore>,
    registry: CategoryRegistry,
    ledger: LedgerQueries,
    notifier: Arc<dyn Notifier>,
}

impl BudgetTracker {
    /// Creates a tracker.
    pub fn new(
        budgets: Arc<dyn BudgetStore>,
        users: Arc<dyn UserStore>,
        registry: CategoryRegistry,
        ledger: LedgerQueries,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            budgets,
            users,
            registry,
            ledger,
            notifier,
        }
    }

    /// Sets the limit of one of the owner's categories for a month.
    ///
    /// An existing budget for the same category and month gets its amount
    /// replaced; otherwise a new budget is created.
    ///
    /// # Errors
    ///
    /// Returns `NonPositiveAmount` or `AmountTooLarge`, or a category not-found
    /// error if the category is absent or not owned by `owner`.
    pub fn add_budget(
        &self,
        owner: &User,
        category_id: CategoryId,
        period: Period,
        amount: Decimal,
    ) -> Result<BudgetView, BudgetError> {
        if amount <= Decimal::ZERO {
            return Err(BudgetError::NonPositiveAmount);
        }
        if amount > MAX_AMOUNT {
            return Err(BudgetError::AmountTooLarge(amount));
        }
        let category = self.registry.get_category(category_id, owner)?;

        let budget = match self
            .budgets
            .find_budget_by_category_and_period(owner.id, category.id, period)?
        {
            Some(existing) => Budget { amount, ..existing },
            None => Budget {
                id: BudgetId::UNSET,
                period,
                category_id: category.id,
                owner_id: owner.id,
                amount,
            },
        };
        let saved = self.budgets.save_budget(budget)?;

        info!(
            owner_id = %owner.id,
            budget_id = %saved.id,
            category_id = %category.id,
            %period,
            %amount,
            "Budget set"
        );
        Ok(BudgetView::from(&saved))
    }

    /// Loads one of the owner's budgets.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the budget is absent or not owned by `owner`.
    pub fn get_budget(&self, id: BudgetId, owner: &User) -> Result<BudgetView, BudgetError> {
        self.load_owned(id, owner).map(|b| BudgetView::from(&b))
    }

    /// Lists the owner's budgets across all months.
    ///
    /// # Errors
    ///
    /// Returns a store error if the backend fails.
    pub fn list_budgets(&self, owner: &User) -> Result<Vec<BudgetView>, BudgetError> {
        debug!(owner_id = %owner.id, "Listing budgets");
        let budgets = self.budgets.find_budgets_by_owner(owner.id)?;
        Ok(budgets.iter().map(BudgetView::from).collect())
    }

    /// Deletes one of the owner's budgets.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the budget is absent or not owned by `owner`.
    pub fn delete_budget(&self, id: BudgetId, owner: &User) -> Result<(), BudgetError> {
        self.load_owned(id, owner)?;
        self.budgets.delete_budget(id)?;
        info!(owner_id = %owner.id, budget_id = %id, "Budget deleted");
        Ok(())
    }

    /// Planned versus spent for every budget of the owner in one month.
    ///
    /// # Errors
    ///
    /// Returns a store error if the backend fails.
    pub fn get_budget_report(
        &self,
        owner: &User,
        period: Period,
    ) -> Result<BudgetReport, BudgetError> {
        let budgets = self
            .budgets
            .find_budgets_by_owner_and_period(owner.id, period)?;

        let mut rows = Vec::with_capacity(budgets.len());
        let mut planned_total = Decimal::ZERO;
        let mut spent_total = Decimal::ZERO;

        for budget in &budgets {
            let spent = self.ledger.spent(owner.id, budget.category_id, period)?;
            planned_total += budget.amount;
            spent_total += spent;
            rows.push(BudgetReportRow {
                category: self.category_name(budget.category_id)?,
                planned: budget.amount,
                spent,
                utilization_pct: utilization(spent, budget.amount),
            });
        }

        debug!(owner_id = %owner.id, %period, rows = rows.len(), "Budget report built");

        Ok(BudgetReport {
            period,
            owner_id: owner.id,
            owner: owner.name.clone(),
            rows,
            total: BudgetReportTotal {
                planned: planned_total,
                spent: spent_total,
                utilization_pct: utilization(spent_total, planned_total),
            },
        })
    }

    /// Re-evaluates the budget a transaction falls under.
    ///
    /// Deposits and uncategorized transactions never touch a budget. Otherwise the
    /// month's withdrawals in the category are summed from scratch; when they
    /// meet or exceed the limit the owner is notified and the overrun returned.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the owner record is missing, or the notifier's
    /// failure.
    pub fn check_budget(
        &self,
        transaction: &Transaction,
    ) -> Result<Option<BudgetOverrun>, BudgetError> {
        let Some(category_id) = transaction.category_id else {
            return Ok(None);
        };
        if !transaction.is_withdrawal() {
            return Ok(None);
        }

        let owner = transaction.owner_id;
        let period = Period::of(transaction.date);
        let Some(budget) = self
            .budgets
            .find_budget_by_category_and_period(owner, category_id, period)?
        else {
            return Ok(None);
        };

        let spent = self.ledger.spent(owner, category_id, period)?;
        if spent < budget.amount {
            debug!(
                owner_id = %owner,
                category_id = %category_id,
                %period,
                %spent,
                "Budget within limit"
            );
            return Ok(None);
        }

        let overrun = BudgetOverrun {
            category_id,
            category: self.category_name(category_id)?,
            period,
            planned: budget.amount,
            spent,
            overrun: spent - budget.amount,
        };
        warn!(
            owner_id = %owner,
            category_id = %category_id,
            %period,
            planned = %overrun.planned,
            spent = %overrun.spent,
            "Budget overrun"
        );

        let user = self
            .users
            .find_user(owner)?
            .ok_or(BudgetError::UserNotFound(owner))?;
        self.notifier
            .send(&user.email, OVERRUN_SUBJECT, &overrun.message())?;
        info!(owner_id = %owner, "Budget overrun notification sent");

        Ok(Some(overrun))
    }

    fn load_owned(&self, id: BudgetId, owner: &User) -> Result<Budget, BudgetError> {
        match self.budgets.find_budget(id)? {
            Some(budget) if owner.owns(budget.owner_id) => Ok(budget),
            Some(_) => {
                warn!(owner_id = %owner.id, budget_id = %id, "Budget ownership check failed");
                Err(BudgetError::NotFound(id))
            }
            None => Err(BudgetError::NotFound(id)),
        }
    }

    fn category_name(&self, id: CategoryId) -> Result<String, BudgetError> {
        Ok(self
            .registry
            .find(id)?
            .map_or_else(|| format!("#{id}"), |c| c.name))
    }
}

impl LedgerSubscriber for BudgetTracker {
    fn name(&self) -> &'static str {
        "budget"
    }

    fn on_event(&self, event: &LedgerEvent) -> Result<Vec<String>, AppError> {
        let overrun = self.check_budget(&event.transaction)?;
        Ok(overrun.iter().map(BudgetOverrun::message).collect())
    }
}
