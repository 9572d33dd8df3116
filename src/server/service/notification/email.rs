//! Email delivery for alerts.

use crate::server::{
    error::AppError,
    model::alert::AlertNotification,
    service::email::EmailSender,
};

/// Sends alert notifications to a fixed recipient list.
#[derive(Clone)]
pub struct EmailNotifier {
    sender: EmailSender,
    recipients: Vec<String>,
}

impl EmailNotifier {
    pub fn new(sender: EmailSender, recipients: Vec<String>) -> Self {
        Self { sender, recipients }
    }

    /// Emails every recipient, attempting all of them before returning the first error.
    pub async fn send_alert(&self, notification: &AlertNotification) -> Result<(), AppError> {
        let subject = notification.title();
        let event = &notification.event;
        let body = format!(
            "{}\n\nRule: {}\nMetric: {} = {:.2} (threshold {:.2})\nSeverity: {}\nStarted: {}\nAlert ID: {}\n",
            notification.body(),
            event.rule_name,
            event.metric,
            event.value,
            event.threshold,
            event.severity.as_str(),
            event.started_at.to_rfc3339(),
            event.id,
        );

        let mut first_error = None;
        for recipient in &self.recipients {
            if let Err(e) = self.sender.send(recipient, &subject, &body).await {
                tracing::warn!(recipient = %recipient, "Failed to email alert: {}", e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
