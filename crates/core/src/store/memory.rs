//! In-memory persistence engine.
//!
//! Concurrent maps keyed by ID, one atomic sequence per entity, and secondary
//! indexes for the two uniqueness rules: category names per owner and budgets per
//! (owner, category, period). Lists come back in ascending ID order.

use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tally_shared::types::{BudgetId, CategoryId, GoalId, TransactionId, UserId};
use tracing::debug;

use super::{BudgetStore, CategoryStore, GoalStore, StoreError, TransactionStore, UserStore};
use crate::budget::Budget;
use crate::category::Category;
use crate::goal::Goal;
use crate::identity::User;
use crate::ledger::Transaction;
use crate::period::Period;

type BudgetKey = (UserId, CategoryId, Period);

/// Monotonic ID generator starting at 1.
#[derive(Debug, Default)]
struct Sequence(AtomicI64);

impl Sequence {
    fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Keeps the sequence ahead of explicitly assigned IDs.
    fn observe(&self, id: i64) {
        self.0.fetch_max(id, Ordering::SeqCst);
    }
}

/// Thread-safe in-memory implementation of every store trait.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: DashMap<UserId, User>,
    categories: DashMap<CategoryId, Category>,
    category_names: DashMap<(UserId, String), CategoryId>,
    transactions: DashMap<TransactionId, Transaction>,
    budgets: DashMap<BudgetId, Budget>,
    budget_keys: DashMap<BudgetKey, BudgetId>,
    goals: DashMap<GoalId, Goal>,
    user_seq: Sequence,
    category_seq: Sequence,
    transaction_seq: Sequence,
    budget_seq: Sequence,
    goal_seq: Sequence,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Collects map values sorted by key.
fn sorted<K, V, F>(map: &DashMap<K, V>, keep: F) -> Vec<V>
where
    K: Eq + std::hash::Hash + Ord + Copy,
    V: Clone,
    F: Fn(&V) -> bool,
{
    let mut rows: Vec<(K, V)> = map
        .iter()
        .filter(|entry| keep(entry.value()))
        .map(|entry| (*entry.key(), entry.value().clone()))
        .collect();
    rows.sort_by_key(|(key, _)| *key);
    rows.into_iter().map(|(_, value)| value).collect()
}

impl UserStore for InMemoryStore {
    fn save_user(&self, mut user: User) -> Result<User, StoreError> {
        if user.id.is_unset() {
            user.id = UserId::new(self.user_seq.next());
        } else {
            self.user_seq.observe(user.id.into_inner());
        }
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }
}

impl CategoryStore for InMemoryStore {
    fn save_category(&self, mut category: Category) -> Result<Category, StoreError> {
        if category.id.is_unset() {
            category.id = CategoryId::new(self.category_seq.next());
        } else {
            self.category_seq.observe(category.id.into_inner());
        }

        let key = (category.owner_id, category.name.clone());
        match self.category_names.entry(key) {
            Entry::Occupied(existing) if *existing.get() != category.id => {
                return Err(StoreError::Conflict(format!(
                    "category '{}' already exists",
                    category.name
                )));
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(slot) => {
                slot.insert(category.id);
            }
        }

        let previous = self
            .categories
            .get(&category.id)
            .map(|c| (c.owner_id, c.name.clone()));
        if let Some(old_key) = previous {
            if old_key != (category.owner_id, category.name.clone()) {
                self.category_names.remove(&old_key);
            }
        }

        self.categories.insert(category.id, category.clone());
        debug!(category_id = %category.id, "Category stored");
        Ok(category)
    }

    fn find_category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        Ok(self.categories.get(&id).map(|c| c.value().clone()))
    }

    fn find_category_by_name_and_owner(
        &self,
        name: &str,
        owner: UserId,
    ) -> Result<Option<Category>, StoreError> {
        let id = self
            .category_names
            .get(&(owner, name.to_string()))
            .map(|id| *id.value());
        Ok(id.and_then(|id| self.categories.get(&id).map(|c| c.value().clone())))
    }

    fn find_categories_by_owner(&self, owner: UserId) -> Result<Vec<Category>, StoreError> {
        Ok(sorted(&self.categories, |c| c.owner_id == owner))
    }

    fn delete_category(&self, id: CategoryId) -> Result<(), StoreError> {
        let (_, removed) = self
            .categories
            .remove(&id)
            .ok_or_else(|| StoreError::NotFound(format!("category {id}")))?;
        self.category_names.remove(&(removed.owner_id, removed.name));
        Ok(())
    }
}

impl TransactionStore for InMemoryStore {
    fn save_transaction(&self, mut transaction: Transaction) -> Result<Transaction, StoreError> {
        if transaction.id.is_unset() {
            transaction.id = TransactionId::new(self.transaction_seq.next());
        } else {
            self.transaction_seq.observe(transaction.id.into_inner());
        }
        self.transactions.insert(transaction.id, transaction.clone());
        debug!(transaction_id = %transaction.id, "Transaction stored");
        Ok(transaction)
    }

    fn find_transaction(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError> {
        Ok(self.transactions.get(&id).map(|t| t.value().clone()))
    }

    fn find_transactions_by_owner(&self, owner: UserId) -> Result<Vec<Transaction>, StoreError> {
        Ok(sorted(&self.transactions, |t| t.owner_id == owner))
    }

    fn delete_transaction(&self, id: TransactionId) -> Result<(), StoreError> {
        self.transactions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("transaction {id}")))
    }

    fn count_transactions_by_category(&self, category: CategoryId) -> Result<usize, StoreError> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.category_id == Some(category))
            .count())
    }
}

impl BudgetStore for InMemoryStore {
    fn save_budget(&self, mut budget: Budget) -> Result<Budget, StoreError> {
        if budget.id.is_unset() {
            budget.id = BudgetId::new(self.budget_seq.next());
        } else {
            self.budget_seq.observe(budget.id.into_inner());
        }

        let key = (budget.owner_id, budget.category_id, budget.period);
        match self.budget_keys.entry(key) {
            Entry::Occupied(existing) if *existing.get() != budget.id => {
                return Err(StoreError::Conflict(format!(
                    "budget for category {} in {} already exists",
                    budget.category_id, budget.period
                )));
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(slot) => {
                slot.insert(budget.id);
            }
        }

        let previous = self
            .budgets
            .get(&budget.id)
            .map(|b| (b.owner_id, b.category_id, b.period));
        if let Some(old_key) = previous {
            if old_key != key {
                self.budget_keys.remove(&old_key);
            }
        }

        self.budgets.insert(budget.id, budget.clone());
        debug!(budget_id = %budget.id, "Budget stored");
        Ok(budget)
    }

    fn find_budget(&self, id: BudgetId) -> Result<Option<Budget>, StoreError> {
        Ok(self.budgets.get(&id).map(|b| b.value().clone()))
    }

    fn find_budgets_by_owner(&self, owner: UserId) -> Result<Vec<Budget>, StoreError> {
        Ok(sorted(&self.budgets, |b| b.owner_id == owner))
    }

    fn find_budgets_by_owner_and_period(
        &self,
        owner: UserId,
        period: Period,
    ) -> Result<Vec<Budget>, StoreError> {
        Ok(sorted(&self.budgets, |b| {
            b.owner_id == owner && b.period == period
        }))
    }

    fn find_budget_by_category_and_period(
        &self,
        owner: UserId,
        category: CategoryId,
        period: Period,
    ) -> Result<Option<Budget>, StoreError> {
        let id = self
            .budget_keys
            .get(&(owner, category, period))
            .map(|id| *id.value());
        Ok(id.and_then(|id| self.budgets.get(&id).map(|b| b.value().clone())))
    }

    fn delete_budget(&self, id: BudgetId) -> Result<(), StoreError> {
        let (_, removed) = self
            .budgets
            .remove(&id)
            .ok_or_else(|| StoreError::NotFound(format!("budget {id}")))?;
        self.budget_keys
            .remove(&(removed.owner_id, removed.category_id, removed.period));
        Ok(())
    }

    fn count_budgets_by_category(&self, category: CategoryId) -> Result<usize, StoreError> {
        Ok(self
            .budgets
            .iter()
            .filter(|b| b.category_id == category)
            .count())
    }
}

impl GoalStore for InMemoryStore {
    fn save_goal(&self, mut goal: Goal) -> Result<Goal, StoreError> {
        if goal.id.is_unset() {
            goal.id = GoalId::new(self.goal_seq.next());
        } else {
            self.goal_seq.observe(goal.id.into_inner());
        }
        self.goals.insert(goal.id, goal.clone());
        Ok(goal)
    }

    fn find_goal(&self, id: GoalId) -> Result<Option<Goal>, StoreError> {
        Ok(self.goals.get(&id).map(|g| g.value().clone()))
    }

    fn find_goals_by_owner(&self, owner: UserId) -> Result<Vec<Goal>, StoreError> {
        Ok(sorted(&self.goals, |g| g.owner_id == owner))
    }

    fn delete_goal(&self, id: GoalId) -> Result<(), StoreError> {
        self.goals
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("goal {id}")))
    }
}
