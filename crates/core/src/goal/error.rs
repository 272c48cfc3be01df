//! Goal error types.

use rust_decimal::Decimal;
use tally_shared::types::{GoalId, UserId};
use tally_shared::{AppError, NotifyError};
use thiserror::Error;

use crate::ledger::MAX_AMOUNT;
use crate::store::StoreError;

/// Goal-related errors.
#[derive(Debug, Error)]
pub enum GoalError {
    /// Goal absent or not owned by the acting user.
    #[error("Goal not found: {0}")]
    NotFound(GoalId),

    /// Goal name is empty.
    #[error("Goal name cannot be empty")]
    EmptyName,

    /// Target must be strictly positive.
    #[error("Goal target must be positive")]
    NonPositiveTarget,

    /// Target above the supported maximum.
    #[error("Goal target {0} exceeds the maximum of {max}", max = MAX_AMOUNT)]
    TargetTooLarge(Decimal),

    /// The transaction owner has no user record.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Achievement notification could not be delivered.
    #[error("Goal notification failed: {0}")]
    Notify(#[from] NotifyError),

    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<GoalError> for AppError {
    fn from(err: GoalError) -> Self {
        match err {
            GoalError::NotFound(_) | GoalError::UserNotFound(_) => Self::NotFound(err.to_string()),
            GoalError::EmptyName
            | GoalError::NonPositiveTarget
            | GoalError::TargetTooLarge(_) => {
                Self::Validation(err.to_string())
            }
            GoalError::Notify(_) => Self::ExternalService(err.to_string()),
            GoalError::Store(store) => store.into(),
        }
    }
}
