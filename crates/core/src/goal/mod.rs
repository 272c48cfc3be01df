//! Savings goals and achievement detection.

pub mod error;
pub mod tracker;
pub mod types;


pub use error::GoalError;
pub use tracker::GoalTracker;
pub use types::{Goal, GoalInput, GoalProgress, GoalView};
