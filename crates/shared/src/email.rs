//! Email channel for owner notifications.
//!
//! Uses `lettre` with a blocking SMTP transport; the ledger pipeline is synchronous.

use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials, Message,
    SmtpTransport, Transport,
};
use thiserror::Error;
use tracing::info;

use crate::config::EmailConfig;
use crate::notify::{Notifier, NotifyError};

/// Email service errors.
#[derive(Debug, Error)]
pub enum EmailError {
    /// Failed to build email message.
    #[error("Failed to build email: {0}")]
    BuildError(String),
    /// Failed to send email.
    #[error("Failed to send email: {0}")]
    SendError(String),
    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// Email service delivering plain-text messages over SMTP.
#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    /// Creates a new email service.
    #[must_use]
    pub const fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Creates an SMTP transport.
    fn create_transport(&self) -> Result<SmtpTransport, EmailError> {
        let transport = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );
            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(|e| EmailError::SendError(e.to_string()))?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        Ok(transport)
    }

    /// Builds the message without sending it.
    fn build_message(
        &self,
        to_email: &str,
        subject: &str,
        body: &str,
    ) -> Result<Message, EmailError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        Message::builder()
            .from(
                from.parse()
                    .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| EmailError::BuildError(e.to_string()))
    }

    /// Sends a generic email.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be built or sent.
    pub fn send_email(&self, to_email: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        let email = self.build_message(to_email, subject, body)?;

        let transport = self.create_transport()?;
        transport
            .send(&email)
            .map_err(|e| EmailError::SendError(e.to_string()))?;

        info!(to = %to_email, subject = %subject, "Email sent");
        Ok(())
    }
}

impl Notifier for EmailService {
    fn send(&self, address: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        Ok(self.send_email(address, subject, body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_transport_without_credentials() {
        let service = EmailService::new(EmailConfig::default());
        assert!(service.create_transport().is_ok());
    }

    #[test]
    fn test_build_message() {
        let service = EmailService::new(EmailConfig::default());
        let message = service.build_message("owner@example.com", "Budget exceeded", "Groceries");
        assert!(message.is_ok());
    }

    #[test]
    fn test_build_message_rejects_invalid_address() {
        let service = EmailService::new(EmailConfig::default());
        let result = service.build_message("not an address", "Subject", "Body");
        assert!(matches!(result, Err(EmailError::InvalidAddress(_))));
    }

    #[test]
    fn test_email_error_display() {
        assert_eq!(
            format!("{}", EmailError::BuildError("msg".into())),
            "Failed to build email: msg"
        );
        assert_eq!(
            format!("{}", EmailError::SendError("msg".into())),
            "Failed to send email: msg"
        );
        assert_eq!(
            format!("{}", EmailError::InvalidAddress("msg".into())),
            "Invalid email address: msg"
        );
    }
}
