//! Budget error types.

use rust_decimal::Decimal;
use tally_shared::types::{BudgetId, UserId};
use tally_shared::{AppError, NotifyError};
use thiserror::Error;

use crate::category::CategoryError;
use crate::ledger::MAX_AMOUNT;
use crate::store::StoreError;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Budget absent or not owned by the acting user.
    #[error("Budget not found: {0}")]
    NotFound(BudgetId),

    /// Amount must be strictly positive.
    #[error("Budget amount must be positive")]
    NonPositiveAmount,

    /// Amount above the supported maximum.
    #[error("Budget amount {0} exceeds the maximum of {max}", max = MAX_AMOUNT)]
    AmountTooLarge(Decimal),

    /// The transaction owner has no user record.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Category resolution failed.
    #[error(transparent)]
    Category(#[from] CategoryError),

    /// Overrun notification could not be delivered.
    #[error("Budget notification failed: {0}")]
    Notify(#[from] NotifyError),

    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::NotFound(_) | BudgetError::UserNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            BudgetError::NonPositiveAmount | BudgetError::AmountTooLarge(_) => {
                Self::Validation(err.to_string())
            }
            BudgetError::Notify(_) => Self::ExternalService(err.to_string()),
            BudgetError::Category(category) => category.into(),
            BudgetError::Store(store) => store.into(),
        }
    }
}
