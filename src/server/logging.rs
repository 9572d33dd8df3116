//! Tracing subscriber setup and forwarding of error events to Discord.
//!
//! Console output is compact text or JSON depending on `LOG_FORMAT`. When a Discord
//! webhook is configured, every `ERROR` event is also captured with its fields and
//! posted to the webhook by a background task.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tracing::{
    field::{Field, Visit},
    Event, Level, Subscriber,
};
use tracing_subscriber::{
    fmt, layer::Context, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::server::{config::Config, service::notification::discord::DiscordNotifier};

const DEFAULT_FILTER: &str = "info";

/// An `ERROR` event captured for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub target: String,
    pub message: String,
    pub fields: Map<String, Value>,
    pub at: DateTime<Utc>,
}

impl LogRecord {
    pub fn title(&self) -> String {
        format!("Error in {}", self.target)
    }

    pub fn to_json(&self) -> String {
        let record = serde_json::json!({
            "timestamp": self.at.to_rfc3339(),
            "target": self.target,
            "message": self.message,
            "fields": self.fields,
        });
        serde_json::to_string_pretty(&record).unwrap_or_else(|_| self.message.clone())
    }
}

/// Layer that forwards `ERROR` events over a channel.
pub struct DiscordLogLayer {
    sender: mpsc::UnboundedSender<LogRecord>,
}

impl DiscordLogLayer {
    pub fn new(sender: mpsc::UnboundedSender<LogRecord>) -> Self {
        Self { sender }
    }
}

impl<S: Subscriber> Layer<S> for DiscordLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::ERROR {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let record = LogRecord {
            target: event.metadata().target().to_string(),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
            at: Utc::now(),
        };

        // receiver gone means the forwarder stopped; nothing left to do
        let _ = self.sender.send(record);
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = Some(match value {
                Value::String(s) => s,
                other => other.to_string(),
            });
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, Value::from(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.insert(field, Value::from(format!("{:?}", value)));
    }
}

/// Installs the global subscriber.
///
/// Must be called from within the Tokio runtime when a Discord webhook is configured,
/// since the forwarding task is spawned here.
///
/// # Arguments
/// - `config` - Uses `log_json` and `discord_webhook_url`
pub fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let discord_layer = config.discord_webhook_url.clone().map(|url| {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(forward_logs(DiscordNotifier::new(url), receiver));
        DiscordLogLayer::new(sender)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(config.log_json.then(|| fmt::layer().json().with_target(true)))
        .with((!config.log_json).then(|| fmt::layer().compact().with_target(true)))
        .with(discord_layer)
        .init();
}

/// Delivers captured records until every sender is dropped.
async fn forward_logs(notifier: DiscordNotifier, mut receiver: mpsc::UnboundedReceiver<LogRecord>) {
    while let Some(record) = receiver.recv().await {
        if let Err(e) = notifier.send_log(&record.title(), &record.to_json()).await {
            // warn, not error, or the failure would be forwarded again
            tracing::warn!("Failed to forward error log to Discord: {}", e);
        }
    }
}
