//! Persistence collaborator contracts.
//!
//! The core never talks to a database directly. Each entity has a store trait keyed
//! by numeric ID and by owner; saving a record whose ID is `UNSET` assigns a new
//! ID and returns the stored copy. Lookups that find nothing return `Ok(None)` or
//! an empty list, never an error.
//!
//! `InMemoryStore` implements every trait and backs the tests and the sandbox.

mod error;
mod memory;

pub use error::StoreError;
pub use memory::InMemoryStore;

use tally_shared::types::{BudgetId, CategoryId, GoalId, TransactionId, UserId};

use crate::budget::Budget;
use crate::category::Category;
use crate::goal::Goal;
use crate::identity::User;
use crate::ledger::Transaction;
use crate::period::Period;

/// User records.
pub trait UserStore: Send + Sync {
    /// Inserts or replaces a user.
    fn save_user(&self, user: User) -> Result<User, StoreError>;

    /// Finds a user by ID.
    fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError>;
}

/// Category records.
pub trait CategoryStore: Send + Sync {
    /// Inserts or replaces a category.
    fn save_category(&self, category: Category) -> Result<Category, StoreError>;

    /// Finds a category by ID.
    fn find_category(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;

    /// Finds an owner's category by exact name.
    fn find_category_by_name_and_owner(
        &self,
        name: &str,
        owner: UserId,
    ) -> Result<Option<Category>, StoreError>;

    /// Lists an owner's categories.
    fn find_categories_by_owner(&self, owner: UserId) -> Result<Vec<Category>, StoreError>;

    /// Deletes a category.
    fn delete_category(&self, id: CategoryId) -> Result<(), StoreError>;
}

/// Transaction records.
pub trait TransactionStore: Send + Sync {
    /// Inserts or replaces a transaction.
    fn save_transaction(&self, transaction: Transaction) -> Result<Transaction, StoreError>;

    /// Finds a transaction by ID.
    fn find_transaction(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError>;

    /// Lists an owner's transactions.
    fn find_transactions_by_owner(&self, owner: UserId) -> Result<Vec<Transaction>, StoreError>;

    /// Deletes a transaction.
    fn delete_transaction(&self, id: TransactionId) -> Result<(), StoreError>;

    /// Counts transactions referencing a category.
    fn count_transactions_by_category(&self, category: CategoryId) -> Result<usize, StoreError>;
}

/// Budget records.
pub trait BudgetStore: Send + Sync {
    /// Inserts or replaces a budget.
    fn save_budget(&self, budget: Budget) -> Result<Budget, StoreError>;

    /// Finds a budget by ID.
    fn find_budget(&self, id: BudgetId) -> Result<Option<Budget>, StoreError>;

    /// Lists an owner's budgets.
    fn find_budgets_by_owner(&self, owner: UserId) -> Result<Vec<Budget>, StoreError>;

    /// Lists an owner's budgets for one month.
    fn find_budgets_by_owner_and_period(
        &self,
        owner: UserId,
        period: Period,
    ) -> Result<Vec<Budget>, StoreError>;

    /// Finds the budget of an owner's category for one month.
    fn find_budget_by_category_and_period(
        &self,
        owner: UserId,
        category: CategoryId,
        period: Period,
    ) -> Result<Option<Budget>, StoreError>;

    /// Deletes a budget.
    fn delete_budget(&self, id: BudgetId) -> Result<(), StoreError>;

    /// Counts budgets referencing a category.
    fn count_budgets_by_category(&self, category: CategoryId) -> Result<usize, StoreError>;
}

/// Savings goal records.
pub trait GoalStore: Send + Sync {
    /// Inserts or replaces a goal.
    fn save_goal(&self, goal: Goal) -> Result<Goal, StoreError>;

    /// Finds a goal by ID.
    fn find_goal(&self, id: GoalId) -> Result<Option<Goal>, StoreError>;

    /// Lists an owner's goals.
    fn find_goals_by_owner(&self, owner: UserId) -> Result<Vec<Goal>, StoreError>;

    /// Deletes a goal.
    fn delete_goal(&self, id: GoalId) -> Result<(), StoreError>;
}
