//! Outbound email over SMTP.
//!
//! `EmailSender` wraps a lettre `AsyncSmtpTransport`. When no SMTP host is configured it
//! runs in no-op mode and only logs what would have been sent, which keeps development
//! and tests free of mail infrastructure.

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Arc;

use crate::server::{
    config::SmtpConfig,
    error::{internal::InternalError, AppError},
};

/// Shared SMTP sender, cheap to clone.
#[derive(Clone)]
pub struct EmailSender {
    transport: Option<Arc<AsyncSmtpTransport<Tokio1Executor>>>,
    from: Mailbox,
}

impl EmailSender {
    /// Builds the sender from SMTP settings.
    ///
    /// # Arguments
    /// - `smtp` - SMTP relay settings, `None` for no-op mode
    /// - `from` - Sender address used on every message
    ///
    /// # Returns
    /// - `Ok(EmailSender)` - Sender ready for use
    /// - `Err(AppError::AddressErr)` - `from` is not a valid mailbox
    /// - `Err(AppError::SmtpErr)` - Relay could not be configured
    pub fn new(smtp: Option<&SmtpConfig>, from: &str) -> Result<Self, AppError> {
        let from = from.parse::<Mailbox>()?;

        let transport = match smtp {
            Some(smtp) => {
                let mut builder =
                    AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)?
                        .port(smtp.port);

                if let (Some(username), Some(password)) = (&smtp.username, &smtp.password) {
                    builder =
                        builder.credentials(Credentials::new(username.clone(), password.clone()));
                }

                Some(Arc::new(builder.build()))
            }
            None => {
                tracing::warn!("SMTP host not configured; emails will only be logged");
                None
            }
        };

        Ok(Self { transport, from })
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Sends a plain text email.
    ///
    /// # Returns
    /// - `Ok(())` - Message delivered to the relay, or logged in no-op mode
    /// - `Err(AppError::AddressErr)` - Recipient is not a valid address
    /// - `Err(AppError::InternalErr)` - Message could not be built
    /// - `Err(AppError::SmtpErr)` - Relay rejected the message
    pub async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), AppError> {
        let to = recipient.parse::<Mailbox>()?;

        let Some(transport) = &self.transport else {
            tracing::info!(recipient, subject, "Email delivery disabled, skipping send");
            return Ok(());
        };

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| InternalError::EmailBuild(e.to_string()))?;

        transport.send(message).await?;
        tracing::info!(recipient, subject, "Email sent");

        Ok(())
    }
}
