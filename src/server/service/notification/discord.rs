//! Discord webhook delivery for alerts and error logs.

use serenity::{
    all::{CreateEmbed, ExecuteWebhook, Timestamp, Webhook},
    http::Http,
};
use std::sync::Arc;

use crate::server::{
    error::AppError,
    model::alert::{AlertNotification, AlertSeverity, NotificationKind},
};

/// Green used for resolution notices.
const RESOLVED_COLOR: u32 = 0x2ecc71;
/// Discord rejects embed descriptions above 4096 characters.
const MAX_DESCRIPTION_CHARS: usize = 4000;

/// Posts embeds to a single Discord webhook.
#[derive(Clone)]
pub struct DiscordNotifier {
    http: Arc<Http>,
    webhook_url: String,
}

impl DiscordNotifier {
    /// Creates a notifier for `webhook_url`.
    ///
    /// Webhook execution needs no bot token, so the HTTP client is created without one.
    pub fn new(webhook_url: String) -> Self {
        Self {
            http: Arc::new(Http::new("")),
            webhook_url,
        }
    }

    /// Sends an alert embed colored by severity.
    pub async fn send_alert(&self, notification: &AlertNotification) -> Result<(), AppError> {
        let event = &notification.event;
        let color = match notification.kind {
            NotificationKind::Resolved => RESOLVED_COLOR,
            _ => event.severity.color(),
        };

        let mut embed = CreateEmbed::new()
            .title(notification.title())
            .description(truncate(&notification.body()))
            .color(color)
            .field("Metric", event.metric.clone(), true)
            .field("Value", format!("{:.2}", event.value), true)
            .field("Threshold", format!("{:.2}", event.threshold), true)
            .field("Alert ID", event.id.to_string(), true);

        if let Ok(timestamp) = Timestamp::from_unix_timestamp(event.started_at.timestamp()) {
            embed = embed.timestamp(timestamp);
        }

        self.execute(embed).await
    }

    /// Sends a captured error log record.
    pub async fn send_log(&self, title: &str, record: &str) -> Result<(), AppError> {
        let embed = CreateEmbed::new()
            .title(title)
            .description(format!("```json\n{}\n```", truncate(record)))
            .color(AlertSeverity::Critical.color());

        self.execute(embed).await
    }

    async fn execute(&self, embed: CreateEmbed) -> Result<(), AppError> {
        let webhook = Webhook::from_url(self.http.as_ref(), &self.webhook_url).await?;
        webhook
            .execute(self.http.as_ref(), false, ExecuteWebhook::new().embed(embed))
            .await?;

        Ok(())
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_DESCRIPTION_CHARS {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(MAX_DESCRIPTION_CHARS).collect();
    truncated.push_str("...");
    truncated
}
