//! Shared types, errors, and configuration for Tally.
//!
//! This crate provides common building blocks used across all other crates:
//! - Typed numeric IDs for type-safe entity references
//! - Application-wide error taxonomy
//! - Configuration management
//! - Notification channels (SMTP email and structured log)

pub mod config;
pub mod email;
pub mod error;
pub mod notify;
pub mod types;

pub use config::{AppConfig, EmailConfig, LoggingConfig, NotificationChannel, ReportConfig};
pub use email::{EmailError, EmailService};
pub use error::{AppError, AppResult};
pub use notify::{LogNotifier, NotifyError, Notifier};
