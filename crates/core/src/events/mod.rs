//! Synchronous ledger event fan-out.
//!
//! The ledger publishes one [`LedgerEvent`] after every persisted mutation. The
//! dispatcher invokes each subscriber in subscription order on the caller's stack.
//! The first subscriber failure stops the fan-out and surfaces to the caller; the
//! mutation that triggered the event stays persisted.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tally_shared::AppError;
use thiserror::Error;
use tracing::{debug, error};

use crate::ledger::Transaction;

/// What happened to the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationKind {
    /// Transaction recorded.
    Created,
    /// Category, amount or description changed.
    Updated,
    /// Transaction removed.
    Deleted,
}

/// A persisted ledger mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Mutation kind.
    pub kind: MutationKind,
    /// The transaction as persisted, or as it was before deletion.
    pub transaction: Transaction,
}

impl LedgerEvent {
    /// Creates an event.
    #[must_use]
    pub fn new(kind: MutationKind, transaction: Transaction) -> Self {
        Self { kind, transaction }
    }
}

/// Failure raised by a subscriber.
#[derive(Debug, Error)]
#[error("subscriber '{subscriber}' failed: {source}")]
pub struct SubscriberError {
    /// Name of the failing subscriber.
    pub subscriber: &'static str,
    /// Underlying failure.
    #[source]
    pub source: AppError,
}

impl From<SubscriberError> for AppError {
    fn from(err: SubscriberError) -> Self {
        err.source
    }
}

/// A component that reacts to ledger mutations.
pub trait LedgerSubscriber: Send + Sync {
    /// Stable name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Handles an event, returning the notices it produced.
    ///
    /// # Errors
    ///
    /// Returns the failure that aborts the fan-out.
    fn on_event(&self, event: &LedgerEvent) -> Result<Vec<String>, AppError>;
}

/// Notices produced by one subscriber for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    /// Subscriber name.
    pub subscriber: &'static str,
    /// Produced notices, possibly empty.
    pub messages: Vec<String>,
}

/// Ordered list of subscribers invoked synchronously.
#[derive(Clone, Default)]
pub struct NotificationDispatcher {
    subscribers: Vec<Arc<dyn LedgerSubscriber>>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a subscriber; it runs after every earlier one.
    pub fn subscribe(&mut self, subscriber: Arc<dyn LedgerSubscriber>) {
        debug!(subscriber = subscriber.name(), "Subscriber registered");
        self.subscribers.push(subscriber);
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns true if nothing is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Delivers an event to every subscriber in subscription order.
    ///
    /// # Errors
    ///
    /// Returns the first subscriber failure; later subscribers are not invoked.
    pub fn publish(&self, event: &LedgerEvent) -> Result<Vec<Delivery>, SubscriberError> {
        let mut deliveries = Vec::with_capacity(self.subscribers.len());

        for subscriber in &self.subscribers {
            let messages = subscriber.on_event(event).map_err(|source| {
                error!(
                    subscriber = subscriber.name(),
                    transaction_id = %event.transaction.id,
                    error = %source,
                    "Ledger subscriber failed"
                );
                SubscriberError {
                    subscriber: subscriber.name(),
                    source,
                }
            })?;
            deliveries.push(Delivery {
                subscriber: subscriber.name(),
                messages,
            });
        }

        Ok(deliveries)
    }
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.subscribers.iter().map(|s| s.name()).collect();
        f.debug_struct("NotificationDispatcher")
            .field("subscribers", &names)
            .finish()
    }
}
