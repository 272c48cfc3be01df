//! Category error types.

use tally_shared::AppError;
use tally_shared::types::CategoryId;
use thiserror::Error;

use crate::store::StoreError;

/// Category-related errors.
#[derive(Debug, Error)]
pub enum CategoryError {
    /// No category with this ID belongs to the acting user.
    #[error("Category not found: {0}")]
    NotFound(CategoryId),

    /// No category with this name belongs to the acting user.
    #[error("Category not found: {0}")]
    NameNotFound(String),

    /// Category name is empty.
    #[error("Category name cannot be empty")]
    EmptyName,

    /// Category name collides with a report label.
    #[error("Category name '{0}' is reserved")]
    ReservedName(String),

    /// Category is still referenced by transactions or budgets.
    #[error("Category {id} is still used by {transactions} transaction(s) and {budgets} budget(s)")]
    InUse {
        /// The category.
        id: CategoryId,
        /// Number of referencing transactions.
        transactions: usize,
        /// Number of referencing budgets.
        budgets: usize,
    },

    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(_) | CategoryError::NameNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            CategoryError::EmptyName | CategoryError::ReservedName(_) => {
                Self::Validation(err.to_string())
            }
            CategoryError::InUse { .. } => Self::Conflict(err.to_string()),
            CategoryError::Store(store) => store.into(),
        }
    }
}
