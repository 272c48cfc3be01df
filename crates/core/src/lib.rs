//! Core business logic for Tally.
//!
//! The transaction ledger and everything derived from it. Persistence and
//! notification delivery are collaborators behind traits; this crate never talks
//! to a database or a mail server directly.
//!
//! # Modules
//!
//! - `category` - Per-owner named categories
//! - `ledger` - Transactions, queries and balance aggregation
//! - `events` - Synchronous fan-out of ledger mutations
//! - `budget` - Monthly category limits and overrun detection
//! - `goal` - Savings goals and achievement detection
//! - `reports` - Balance, income and cost-by-category statements
//! - `store` - Persistence contracts and the in-memory engine

pub mod budget;
pub mod category;
pub mod events;
pub mod goal;
pub mod identity;
pub mod ledger;
pub mod period;
pub mod reports;
pub mod services;
pub mod store;

#[cfg(test)]
mod testing;

pub use services::Services;
