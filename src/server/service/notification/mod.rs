//! Alert notification delivery.
//!
//! The alerting service only knows the `Notifier` trait. `ChannelNotifier` is the
//! production implementation, routing each notification to the log, a Discord webhook,
//! or the configured email recipients.

pub mod discord;
pub mod email;

use async_trait::async_trait;

use crate::server::{
    error::AppError,
    model::alert::{AlertChannel, AlertNotification, AlertSeverity},
};

use self::{discord::DiscordNotifier, email::EmailNotifier};

/// Delivers alert notifications to one channel at a time.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `notification` through `channel`.
    ///
    /// Callers treat delivery as best-effort and only log returned errors.
    async fn notify(
        &self,
        channel: AlertChannel,
        notification: &AlertNotification,
    ) -> Result<(), AppError>;
}

/// Routes notifications to the log, Discord and email.
///
/// Channels without a configured backend are skipped with a debug log.
#[derive(Clone, Default)]
pub struct ChannelNotifier {
    discord: Option<DiscordNotifier>,
    email: Option<EmailNotifier>,
}

impl ChannelNotifier {
    pub fn new(discord: Option<DiscordNotifier>, email: Option<EmailNotifier>) -> Self {
        Self { discord, email }
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn notify(
        &self,
        channel: AlertChannel,
        notification: &AlertNotification,
    ) -> Result<(), AppError> {
        match channel {
            AlertChannel::Log => {
                log_notification(notification);
                Ok(())
            }
            AlertChannel::Discord => match &self.discord {
                Some(discord) => discord.send_alert(notification).await,
                None => {
                    tracing::debug!(
                        rule = %notification.event.rule_name,
                        "Discord channel not configured, skipping"
                    );
                    Ok(())
                }
            },
            AlertChannel::Email => match &self.email {
                Some(email) => email.send_alert(notification).await,
                None => {
                    tracing::debug!(
                        rule = %notification.event.rule_name,
                        "Email channel not configured, skipping"
                    );
                    Ok(())
                }
            },
        }
    }
}

fn log_notification(notification: &AlertNotification) {
    let event = &notification.event;
    let title = notification.title();
    let body = notification.body();

    match event.severity {
        AlertSeverity::Critical => tracing::error!(
            alert_id = event.id,
            rule = %event.rule_name,
            metric = %event.metric,
            value = event.value,
            threshold = event.threshold,
            "{}: {}", title, body
        ),
        AlertSeverity::Warning => tracing::warn!(
            alert_id = event.id,
            rule = %event.rule_name,
            metric = %event.metric,
            value = event.value,
            threshold = event.threshold,
            "{}: {}", title, body
        ),
        AlertSeverity::Info => tracing::info!(
            alert_id = event.id,
            rule = %event.rule_name,
            metric = %event.metric,
            value = event.value,
            threshold = event.threshold,
            "{}: {}", title, body
        ),
    }
}
