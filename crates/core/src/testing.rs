//! Shared test fixtures.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_shared::{Notifier, NotifyError, ReportConfig};

use crate::Services;
use crate::identity::User;
use crate::ledger::{OperationKind, TransactionInput, TransactionView};
use crate::store::{InMemoryStore, UserStore};

/// A message captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Sent {
    pub address: String,
    pub subject: String,
    pub body: String,
}

/// Notifier that records messages, or fails when told to.
#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    sent: Mutex<Vec<Sent>>,
    failing: Mutex<bool>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, address: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        if *self.failing.lock().unwrap() {
            return Err(NotifyError::Rejected("mailbox unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(Sent {
            address: address.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// Fully wired services with two users.
pub(crate) struct Harness {
    pub services: Services,
    pub notifier: Arc<RecordingNotifier>,
    pub alice: User,
    pub bob: User,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let alice = store.save_user(User::new("Alice", "alice@example.com")).unwrap();
        let bob = store.save_user(User::new("Bob", "bob@example.com")).unwrap();
        let notifier = Arc::new(RecordingNotifier::default());
        let services = Services::new(store, notifier.clone(), ReportConfig::default());
        Self {
            services,
            notifier,
            alice,
            bob,
        }
    }

    pub fn record(
        &self,
        owner: &User,
        kind: OperationKind,
        amount: Decimal,
        date: NaiveDate,
        category: Option<&str>,
    ) -> TransactionView {
        self.services
            .ledger
            .add_transaction(
                owner,
                TransactionInput {
                    date,
                    kind,
                    category_name: category.map(str::to_string),
                    amount,
                    description: String::new(),
                },
            )
            .unwrap()
    }
}

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
