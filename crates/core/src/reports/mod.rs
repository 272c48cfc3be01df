//! Read-only statements built from ledger data.
//!
//! - Balance statement
//! - Income statement
//! - Costs by category

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::{ReportEngine, group_costs};
pub use types::*;
