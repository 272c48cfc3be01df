//! Per-owner named spending categories.

pub mod error;
pub mod registry;
pub mod types;

pub use error::CategoryError;
pub use registry::CategoryRegistry;
pub use types::Category;
