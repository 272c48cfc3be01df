//! Category registry.

use std::sync::Arc;

use tally_shared::types::CategoryId;
use tracing::{debug, info, warn};

use super::error::CategoryError;
use super::types::Category;
use crate::identity::User;
use crate::store::{BudgetStore, CategoryStore, TransactionStore};

/// Owns categories and resolves them by name for an owner.
///
/// Every lookup is scoped to the acting user. A category owned by someone else is
/// reported exactly like a missing one. Reserved names (the report labels) are
/// refused case-insensitively.
#[derive(Clone)]
pub struct CategoryRegistry {
    categories: Arc<dyn CategoryStore>,
    transactions: Arc<dyn TransactionStore>,
    budgets: Arc<dyn BudgetStore>,
    reserved: Arc<[String]>,
}

impl CategoryRegistry {
    /// Creates a registry over the given stores.
    pub fn new(
        categories: Arc<dyn CategoryStore>,
        transactions: Arc<dyn TransactionStore>,
        budgets: Arc<dyn BudgetStore>,
    ) -> Self {
        Self {
            categories,
            transactions,
            budgets,
            reserved: Arc::from([]),
        }
    }

    /// Refuses the given names, ignoring case, when categories are created or renamed.
    #[must_use]
    pub fn with_reserved_names<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        self.reserved = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        self
    }

    /// Creates a category owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyName` for a blank name, `ReservedName` for a report label and
    /// a store `Conflict` if the owner already has a category with that name.
    pub fn add_category(&self, owner: &User, name: &str) -> Result<Category, CategoryError> {
        let name = self.normalize(name)?;
        let saved = self.categories.save_category(Category::new(name, owner.id))?;
        info!(
            owner_id = %owner.id,
            category_id = %saved.id,
            name = %saved.name,
            "Category created"
        );
        Ok(saved)
    }

    /// Renames one of the owner's categories.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the category is absent or not owned by `owner`, and
    /// `EmptyName` or `ReservedName` for an unusable name.
    pub fn edit_category(
        &self,
        id: CategoryId,
        owner: &User,
        new_name: &str,
    ) -> Result<Category, CategoryError> {
        let name = self.normalize(new_name)?;
        let mut category = self.get_category(id, owner)?;
        category.name = name;
        let saved = self.categories.save_category(category)?;
        info!(owner_id = %owner.id, category_id = %id, name = %saved.name, "Category renamed");
        Ok(saved)
    }

    /// Deletes one of the owner's categories.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the category is absent or not owned by `owner`, and
    /// `InUse` while a transaction or budget still references it.
    pub fn delete_category(&self, id: CategoryId, owner: &User) -> Result<(), CategoryError> {
        let category = self.get_category(id, owner)?;

        let transactions = self.transactions.count_transactions_by_category(category.id)?;
        let budgets = self.budgets.count_budgets_by_category(category.id)?;
        if transactions > 0 || budgets > 0 {
            return Err(CategoryError::InUse {
                id,
                transactions,
                budgets,
            });
        }

        self.categories.delete_category(id)?;
        info!(owner_id = %owner.id, category_id = %id, "Category deleted");
        Ok(())
    }

    /// Loads one of the owner's categories by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the category is absent or not owned by `owner`.
    pub fn get_category(&self, id: CategoryId, owner: &User) -> Result<Category, CategoryError> {
        match self.categories.find_category(id)? {
            Some(category) if owner.owns(category.owner_id) => Ok(category),
            Some(_) => {
                warn!(owner_id = %owner.id, category_id = %id, "Category ownership check failed");
                Err(CategoryError::NotFound(id))
            }
            None => Err(CategoryError::NotFound(id)),
        }
    }

    /// Resolves a category by exact name within the owner's categories.
    ///
    /// # Errors
    ///
    /// Returns `NameNotFound` if the owner has no category with that name.
    pub fn get_by_name(&self, name: &str, owner: &User) -> Result<Category, CategoryError> {
        debug!(owner_id = %owner.id, name, "Resolving category by name");
        self.categories
            .find_category_by_name_and_owner(name, owner.id)?
            .ok_or_else(|| CategoryError::NameNotFound(name.to_string()))
    }

    /// Resolves a category by ID regardless of owner.
    ///
    /// Used where the owner is implied by an already ownership-checked record.
    pub(crate) fn find(&self, id: CategoryId) -> Result<Option<Category>, CategoryError> {
        Ok(self.categories.find_category(id)?)
    }

    /// Lists the owner's categories.
    ///
    /// # Errors
    ///
    /// Returns a store error if the backend fails.
    pub fn list_all(&self, owner: &User) -> Result<Vec<Category>, CategoryError> {
        debug!(owner_id = %owner.id, "Listing categories");
        Ok(self.categories.find_categories_by_owner(owner.id)?)
    }

    fn normalize(&self, name: &str) -> Result<String, CategoryError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        let lowered = trimmed.to_lowercase();
        if self.reserved.iter().any(|reserved| *reserved == lowered) {
            return Err(CategoryError::ReservedName(trimmed.to_string()));
        }
        Ok(trimmed.to_string())
    }
}
