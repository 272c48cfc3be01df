//! Owner notification channels.
//!
//! The ledger pipeline only knows the `Notifier` contract: deliver a message to an
//! address, synchronously. Delivery failures are returned to the caller untouched.

use thiserror::Error;
use tracing::info;

use crate::email::EmailError;

/// Notification delivery errors.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The email channel failed.
    #[error(transparent)]
    Email(#[from] EmailError),

    /// The channel rejected the message.
    #[error("Notification rejected: {0}")]
    Rejected(String),
}

/// A channel able to deliver a message to an address.
pub trait Notifier: Send + Sync {
    /// Delivers one message.
    ///
    /// # Errors
    ///
    /// Returns an error if the message could not be delivered.
    fn send(&self, address: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// Notifier that writes every message to the structured log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, address: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        info!(to = %address, subject = %subject, body = %body, "Notification");
        Ok(())
    }
}
