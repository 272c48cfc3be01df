//! Shared setup for the pipeline integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_core::Services;
use tally_core::identity::User;
use tally_core::ledger::{OperationKind, TransactionInput, TransactionView};
use tally_core::store::{InMemoryStore, UserStore};
use tally_shared::{Notifier, NotifyError, ReportConfig};

/// A delivered message.
#[derive(Debug, Clone)]
pub struct Sent {
    pub address: String,
    pub subject: String,
    pub body: String,
}

/// Records messages; rejects them while `failing` is set.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Sent>>,
    pub failing: Mutex<bool>,
}

impl RecordingNotifier {
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<Sent> {
        self.sent.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, address: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        if *self.failing.lock().unwrap() {
            return Err(NotifyError::Rejected("relay refused".to_string()));
        }
        self.sent.lock().unwrap().push(Sent {
            address: address.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

pub struct World {
    pub services: Services,
    pub notifier: Arc<RecordingNotifier>,
    pub user: User,
    pub other: User,
}

pub fn world() -> World {
    let store = Arc::new(InMemoryStore::new());
    let user = store
        .save_user(User::new("Ursula", "ursula@example.com"))
        .unwrap();
    let other = store
        .save_user(User::new("Oscar", "oscar@example.com"))
        .unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let services = Services::new(store, notifier.clone(), ReportConfig::default());
    World {
        services,
        notifier,
        user,
        other,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn input(
    kind: OperationKind,
    amount: Decimal,
    date: NaiveDate,
    category: Option<&str>,
) -> TransactionInput {
    TransactionInput {
        date,
        kind,
        category_name: category.map(str::to_string),
        amount,
        description: String::new(),
    }
}

impl World {
    pub fn record(
        &self,
        kind: OperationKind,
        amount: Decimal,
        date: NaiveDate,
        category: Option<&str>,
    ) -> TransactionView {
        self.services
            .ledger
            .add_transaction(&self.user, input(kind, amount, date, category))
            .unwrap()
    }
}
