//! Monthly category budgets and overrun detection.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::BudgetError;
pub use service::{BudgetTracker, utilization};
pub use types::{
    Budget, BudgetOverrun, BudgetReport, BudgetReportRow, BudgetReportTotal, BudgetView,
};
