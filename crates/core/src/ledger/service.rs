//! Ledger service: transaction mutations, queries and balance aggregation.

use std::sync::Arc;

use rust_decimal::Decimal;
use tally_shared::types::{CategoryId, TransactionId, UserId};
use tracing::{debug, info, warn};

use super::balance::{LedgerTotals, total_withdrawn};
use super::error::LedgerError;
use super::transaction::{MAX_AMOUNT, OperationKind, Transaction};
use super::types::{TransactionFilter, TransactionInput, TransactionUpdate, TransactionView};
use crate::category::{Category, CategoryRegistry};
use crate::events::{LedgerEvent, MutationKind, NotificationDispatcher};
use crate::identity::User;
use crate::period::Period;
use crate::store::{CategoryStore, StoreError, TransactionStore};

/// Read side of the ledger.
///
/// Shared by the ledger itself, the trackers and the report engine so that every
/// consumer aggregates transactions the same way.
#[derive(Clone)]
pub struct LedgerQueries {
    transactions: Arc<dyn TransactionStore>,
    categories: Arc<dyn CategoryStore>,
}

impl LedgerQueries {
    /// Creates the read side over the given stores.
    pub fn new(
        transactions: Arc<dyn TransactionStore>,
        categories: Arc<dyn CategoryStore>,
    ) -> Self {
        Self {
            transactions,
            categories,
        }
    }

    /// Returns every transaction matching the filter.
    ///
    /// Order follows the store and is not part of the contract.
    ///
    /// # Errors
    ///
    /// Returns a store error if the backend fails.
    pub fn find(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, StoreError> {
        let rows = self.transactions.find_transactions_by_owner(filter.owner)?;
        Ok(rows.into_iter().filter(|t| filter.matches(t)).collect())
    }

    /// Deposit and withdrawal totals of the transactions matching the filter.
    ///
    /// # Errors
    ///
    /// Returns a store error if the backend fails.
    pub fn totals(&self, filter: &TransactionFilter) -> Result<LedgerTotals, StoreError> {
        Ok(self.find(filter)?.iter().collect())
    }

    /// Current balance of an owner over all of their transactions.
    ///
    /// # Errors
    ///
    /// Returns a store error if the backend fails.
    pub fn balance(&self, owner: UserId) -> Result<Decimal, StoreError> {
        let balance = self.totals(&TransactionFilter::for_owner(owner))?.balance();
        debug!(owner_id = %owner, %balance, "Balance computed");
        Ok(balance)
    }

    /// Withdrawals of an owner in one category during one month.
    ///
    /// # Errors
    ///
    /// Returns a store error if the backend fails.
    pub fn spent(
        &self,
        owner: UserId,
        category: CategoryId,
        period: Period,
    ) -> Result<Decimal, StoreError> {
        let filter = TransactionFilter::for_owner(owner)
            .between(period.first_day(), period.last_day())
            .category(category)
            .kind(OperationKind::Withdraw);
        Ok(total_withdrawn(&self.find(&filter)?))
    }

    /// Builds the caller-facing view of a transaction.
    ///
    /// # Errors
    ///
    /// Returns a store error if the backend fails.
    pub fn to_view(&self, transaction: &Transaction) -> Result<TransactionView, StoreError> {
        let category = match transaction.category_id {
            Some(id) => self.categories.find_category(id)?,
            None => None,
        };
        Ok(TransactionView::new(transaction, category.as_ref()))
    }
}

/// Owns transactions and publishes every mutation to the dispatcher.
pub struct Ledger {
    registry: CategoryRegistry,
    transactions: Arc<dyn TransactionStore>,
    queries: LedgerQueries,
    dispatcher: NotificationDispatcher,
}

impl Ledger {
    /// Creates a ledger.
    pub fn new(
        registry: CategoryRegistry,
        transactions: Arc<dyn TransactionStore>,
        queries: LedgerQueries,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            registry,
            transactions,
            queries,
            dispatcher,
        }
    }

    /// Read side shared with the trackers and reports.
    #[must_use]
    pub fn queries(&self) -> &LedgerQueries {
        &self.queries
    }

    /// Records a transaction for `owner`.
    ///
    /// Subscribers run before this returns. If one of them fails the transaction
    /// stays recorded and the failure is returned.
    ///
    /// # Errors
    ///
    /// Returns `NonPositiveAmount` or `AmountTooLarge`, a category-not-found error if the named
    /// category is absent or not owned, or the first subscriber failure.
    pub fn add_transaction(
        &self,
        owner: &User,
        input: TransactionInput,
    ) -> Result<TransactionView, LedgerError> {
        validate_amount(input.amount)?;
        let category = self.resolve_category(owner, input.category_name.as_deref())?;

        let transaction = Transaction {
            id: TransactionId::UNSET,
            date: input.date,
            kind: input.kind,
            category_id: category.as_ref().map(|c| c.id),
            amount: input.amount,
            description: input.description.trim().to_string(),
            owner_id: owner.id,
        };
        let saved = self.transactions.save_transaction(transaction)?;

        info!(
            owner_id = %owner.id,
            transaction_id = %saved.id,
            kind = %saved.kind,
            amount = %saved.amount,
            "Transaction recorded"
        );

        let view = TransactionView::new(&saved, category.as_ref());
        self.publish(MutationKind::Created, saved)?;
        Ok(view)
    }

    /// Changes the category, amount and description of one of the owner's
    /// transactions. Date, kind and owner never change.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` if the transaction is absent or not owned by
    /// `owner`, plus the errors of [`Ledger::add_transaction`].
    pub fn update_transaction(
        &self,
        id: TransactionId,
        owner: &User,
        update: TransactionUpdate,
    ) -> Result<TransactionView, LedgerError> {
        let mut transaction = self.load_owned(id, owner)?;
        validate_amount(update.amount)?;
        let category = self.resolve_category(owner, update.category_name.as_deref())?;

        transaction.category_id = category.as_ref().map(|c| c.id);
        transaction.amount = update.amount;
        transaction.description = update.description.trim().to_string();
        let saved = self.transactions.save_transaction(transaction)?;

        info!(
            owner_id = %owner.id,
            transaction_id = %id,
            amount = %saved.amount,
            "Transaction updated"
        );

        let view = TransactionView::new(&saved, category.as_ref());
        self.publish(MutationKind::Updated, saved)?;
        Ok(view)
    }

    /// Deletes one of the owner's transactions.
    ///
    /// The published event carries the deleted record so subscribers can
    /// recompute what it used to contribute to.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` if the transaction is absent or not owned by
    /// `owner`, or the first subscriber failure.
    pub fn delete_transaction(&self, id: TransactionId, owner: &User) -> Result<(), LedgerError> {
        let transaction = self.load_owned(id, owner)?;
        self.transactions.delete_transaction(id)?;

        info!(owner_id = %owner.id, transaction_id = %id, "Transaction deleted");

        self.publish(MutationKind::Deleted, transaction)
    }

    /// Loads one of the owner's transactions.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` if the transaction is absent or not owned by
    /// `owner`.
    pub fn get_transaction_by_id(
        &self,
        id: TransactionId,
        owner: &User,
    ) -> Result<TransactionView, LedgerError> {
        let transaction = self.load_owned(id, owner)?;
        Ok(self.queries.to_view(&transaction)?)
    }

    /// Lists the transactions matching the filter.
    ///
    /// # Errors
    ///
    /// Returns a store error if the backend fails.
    pub fn get_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionView>, LedgerError> {
        debug!(owner_id = %filter.owner, ?filter, "Querying transactions");
        let rows = self.queries.find(filter)?;
        rows.iter()
            .map(|t| self.queries.to_view(t).map_err(LedgerError::from))
            .collect()
    }

    /// Deposits minus withdrawals over all of the owner's transactions.
    ///
    /// # Errors
    ///
    /// Returns a store error if the backend fails.
    pub fn get_current_balance(&self, owner: &User) -> Result<Decimal, LedgerError> {
        Ok(self.queries.balance(owner.id)?)
    }

    fn load_owned(&self, id: TransactionId, owner: &User) -> Result<Transaction, LedgerError> {
        match self.transactions.find_transaction(id)? {
            Some(transaction) if owner.owns(transaction.owner_id) => Ok(transaction),
            Some(_) => {
                warn!(
                    owner_id = %owner.id,
                    transaction_id = %id,
                    "Transaction ownership check failed"
                );
                Err(LedgerError::TransactionNotFound(id))
            }
            None => Err(LedgerError::TransactionNotFound(id)),
        }
    }

    fn resolve_category(
        &self,
        owner: &User,
        name: Option<&str>,
    ) -> Result<Option<Category>, LedgerError> {
        name.map(|name| self.registry.get_by_name(name, owner))
            .transpose()
            .map_err(LedgerError::from)
    }

    fn publish(&self, kind: MutationKind, transaction: Transaction) -> Result<(), LedgerError> {
        let event = LedgerEvent::new(kind, transaction);
        let deliveries = self.dispatcher.publish(&event)?;
        let notices: usize = deliveries.iter().map(|d| d.messages.len()).sum();
        debug!(transaction_id = %event.transaction.id, ?kind, notices, "Ledger event delivered");
        Ok(())
    }
}

fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(LedgerError::AmountTooLarge(amount));
    }
    Ok(())
}
