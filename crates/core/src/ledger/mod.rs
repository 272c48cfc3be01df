//! Transaction ledger.
//!
//! - Transaction aggregate and operation kinds
//! - Inputs, views and query filters
//! - Balance aggregation
//! - The ledger service and its shared read side

pub mod balance;
pub mod error;
pub mod service;
pub mod transaction;
pub mod types;


pub use balance::{LedgerTotals, total_withdrawn};
pub use error::LedgerError;
pub use service::{Ledger, LedgerQueries};
pub use transaction::{MAX_AMOUNT, OperationKind, Transaction};
pub use types::{TransactionFilter, TransactionInput, TransactionUpdate, TransactionView};
