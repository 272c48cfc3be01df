//! Ledger error types.

use rust_decimal::Decimal;
use tally_shared::AppError;
use tally_shared::types::TransactionId;
use thiserror::Error;

use crate::category::CategoryError;
use crate::events::SubscriberError;
use crate::store::StoreError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Transaction absent or not owned by the acting user.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// Amount must be strictly positive.
    #[error("Transaction amount must be positive")]
    NonPositiveAmount,

    /// Amount above the supported maximum.
    #[error("Transaction amount {0} exceeds the maximum of {max}", max = super::MAX_AMOUNT)]
    AmountTooLarge(Decimal),

    /// Category resolution failed.
    #[error(transparent)]
    Category(#[from] CategoryError),

    /// A subscriber failed after the mutation was persisted.
    #[error(transparent)]
    Subscriber(#[from] SubscriberError),

    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::AmountTooLarge(_) => "AMOUNT_TOO_LARGE",
            Self::Category(CategoryError::NotFound(_) | CategoryError::NameNotFound(_)) => {
                "CATEGORY_NOT_FOUND"
            }
            Self::Category(_) => "CATEGORY_ERROR",
            Self::Subscriber(_) => "SUBSCRIBER_FAILED",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    /// Returns true if the transaction itself was persisted before the failure.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Subscriber(_))
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::TransactionNotFound(_) => Self::NotFound(err.to_string()),
            LedgerError::NonPositiveAmount | LedgerError::AmountTooLarge(_) => {
                Self::Validation(err.to_string())
            }
            LedgerError::Category(category) => category.into(),
            LedgerError::Subscriber(subscriber) => subscriber.into(),
            LedgerError::Store(store) => store.into(),
        }
    }
}
