//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Notification channel configuration.
    #[serde(default)]
    pub notification: NotificationConfig,
    /// Statement labels.
    #[serde(default)]
    pub reports: ReportConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive, used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "tally=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

/// Where owner notifications are delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    /// Write notifications to the structured log.
    #[default]
    Log,
    /// Deliver notifications by SMTP email.
    Smtp,
}

/// Notification configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationConfig {
    /// Selected channel.
    #[serde(default)]
    pub channel: NotificationChannel,
    /// SMTP settings, used by the `smtp` channel.
    #[serde(default)]
    pub email: EmailConfig,
}

/// SMTP email configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub smtp_username: String,
    /// SMTP password.
    #[serde(default)]
    pub smtp_password: String,
    /// Sender address.
    #[serde(default = "default_from_email")]
    pub from_email: String,
    /// Sender display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    1025
}

fn default_from_email() -> String {
    "noreply@tally.local".to_string()
}

fn default_from_name() -> String {
    "Tally".to_string()
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

/// Labels used by the statements.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Group label for withdrawals that carry no category.
    #[serde(default = "default_no_category_label")]
    pub no_category_label: String,
    /// Label of the synthetic total row in the cost-by-category statement.
    #[serde(default = "default_grand_total_label")]
    pub grand_total_label: String,
}

fn default_no_category_label() -> String {
    "No category".to_string()
}

fn default_grand_total_label() -> String {
    "grand total".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            no_category_label: default_no_category_label(),
            grand_total_label: default_grand_total_label(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from config files and environment.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `TALLY__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TALLY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
