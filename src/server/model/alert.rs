//! Alert rules, events and notifications.
//!
//! Rules compare one metric from a `MetricsSnapshot` against a threshold. When a rule
//! fires the alerting service opens an `AlertEvent`, escalates it if it stays
//! unacknowledged, and resolves it once the condition clears.

use chrono::{DateTime, Duration, Utc};

use crate::{
    model::monitoring::{AlertEventDto, AlertRuleDto},
    server::error::AppError,
};

/// Longest accepted cooldown or escalation delay (one year).
pub const MAX_RULE_DURATION_SECONDS: i64 = 365 * 24 * 60 * 60;

fn rule_duration(field: &str, seconds: i64) -> Result<Duration, AppError> {
    if !(0..=MAX_RULE_DURATION_SECONDS).contains(&seconds) {
        return Err(AppError::BadRequest(format!(
            "{} must be between 0 and {}",
            field, MAX_RULE_DURATION_SECONDS
        )));
    }
    Duration::try_seconds(seconds)
        .ok_or_else(|| AppError::BadRequest(format!("{} is out of range", field)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertCondition {
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    Equal,
}

impl AlertCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GreaterThan => "gt",
            Self::GreaterOrEqual => "gte",
            Self::LessThan => "lt",
            Self::LessOrEqual => "lte",
            Self::Equal => "eq",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "gt" => Some(Self::GreaterThan),
            "gte" => Some(Self::GreaterOrEqual),
            "lt" => Some(Self::LessThan),
            "lte" => Some(Self::LessOrEqual),
            "eq" => Some(Self::Equal),
            _ => None,
        }
    }

    pub fn is_met(&self, value: f64, threshold: f64) -> bool {
        match self {
            Self::GreaterThan => value > threshold,
            Self::GreaterOrEqual => value >= threshold,
            Self::LessThan => value < threshold,
            Self::LessOrEqual => value <= threshold,
            Self::Equal => (value - threshold).abs() < f64::EPSILON,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    /// Next severity level; `Critical` stays `Critical`.
    pub fn escalate(&self) -> Self {
        match self {
            Self::Info => Self::Warning,
            Self::Warning | Self::Critical => Self::Critical,
        }
    }

    /// Embed color used for Discord notifications.
    pub fn color(&self) -> u32 {
        match self {
            Self::Info => 0x3498db,
            Self::Warning => 0xf1c40f,
            Self::Critical => 0xe74c3c,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertChannel {
    Log,
    Discord,
    Email,
}

impl AlertChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Discord => "discord",
            Self::Email => "email",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "log" => Some(Self::Log),
            "discord" => Some(Self::Discord),
            "email" => Some(Self::Email),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertRule {
    /// Unique rule name.
    pub name: String,
    /// Key looked up in the metrics snapshot.
    pub metric: String,
    pub condition: AlertCondition,
    pub threshold: f64,
    pub severity: AlertSeverity,
    pub channels: Vec<AlertChannel>,
    /// Minimum time between two trigger notifications of this rule.
    pub cooldown: Duration,
    /// Escalate an unacknowledged alert once it has been active this long.
    pub escalation_after: Option<Duration>,
    pub enabled: bool,
    /// Evaluation is skipped until this instant.
    pub suppressed_until: Option<DateTime<Utc>>,
}

impl AlertRule {
    pub fn is_suppressed(&self, now: DateTime<Utc>) -> bool {
        self.suppressed_until.is_some_and(|until| now < until)
    }

    /// Builds a rule from its API representation.
    ///
    /// # Returns
    /// - `Ok(AlertRule)` - All enumerated fields parsed
    /// - `Err(AppError::BadRequest)` - Empty name/metric, unknown condition, severity or
    ///   channel, or durations that are negative or above `MAX_RULE_DURATION_SECONDS`
    pub fn from_dto(dto: AlertRuleDto) -> Result<Self, AppError> {
        if dto.name.trim().is_empty() || dto.metric.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Rule name and metric must not be empty".to_string(),
            ));
        }

        let condition = AlertCondition::parse(&dto.condition).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown alert condition '{}'", dto.condition))
        })?;
        let severity = AlertSeverity::parse(&dto.severity).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown alert severity '{}'", dto.severity))
        })?;
        let channels = dto
            .channels
            .iter()
            .map(|channel| {
                AlertChannel::parse(channel).ok_or_else(|| {
                    AppError::BadRequest(format!("Unknown alert channel '{}'", channel))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let cooldown = rule_duration("cooldown_seconds", dto.cooldown_seconds)?;
        let escalation_after = dto
            .escalation_after_seconds
            .map(|seconds| rule_duration("escalation_after_seconds", seconds))
            .transpose()?;

        Ok(Self {
            name: dto.name.trim().to_string(),
            metric: dto.metric.trim().to_string(),
            condition,
            threshold: dto.threshold,
            severity,
            channels,
            cooldown,
            escalation_after,
            enabled: dto.enabled,
            suppressed_until: dto.suppressed_until,
        })
    }

    pub fn into_dto(self) -> AlertRuleDto {
        AlertRuleDto {
            name: self.name,
            metric: self.metric,
            condition: self.condition.as_str().to_string(),
            threshold: self.threshold,
            severity: self.severity.as_str().to_string(),
            channels: self
                .channels
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
            cooldown_seconds: self.cooldown.num_seconds(),
            escalation_after_seconds: self.escalation_after.map(|d| d.num_seconds()),
            enabled: self.enabled,
            suppressed_until: self.suppressed_until,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStatus {
    Active,
    Resolved,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Resolved => "resolved",
        }
    }
}

/// An alert raised by a rule.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvent {
    pub id: u64,
    pub rule_name: String,
    pub metric: String,
    /// Metric value at the latest evaluation.
    pub value: f64,
    pub threshold: f64,
    pub severity: AlertSeverity,
    pub status: AlertStatus,
    pub channels: Vec<AlertChannel>,
    pub message: String,
    pub started_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub acknowledged: bool,
    pub escalated: bool,
}

impl AlertEvent {
    pub fn into_dto(self) -> AlertEventDto {
        AlertEventDto {
            id: self.id,
            rule_name: self.rule_name,
            metric: self.metric,
            value: self.value,
            threshold: self.threshold,
            severity: self.severity.as_str().to_string(),
            status: self.status.as_str().to_string(),
            channels: self
                .channels
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
            message: self.message,
            started_at: self.started_at,
            resolved_at: self.resolved_at,
            acknowledged: self.acknowledged,
            escalated: self.escalated,
        }
    }
}

/// What happened to an alert, for notification wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Triggered,
    Escalated,
    Resolved,
}

/// Message handed to notifiers for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertNotification {
    pub kind: NotificationKind,
    pub event: AlertEvent,
}

impl AlertNotification {
    pub fn title(&self) -> String {
        let prefix = match self.kind {
            NotificationKind::Triggered => "Alert",
            NotificationKind::Escalated => "Escalated",
            NotificationKind::Resolved => "Resolved",
        };
        format!(
            "[{}] {}: {}",
            self.event.severity.as_str().to_uppercase(),
            prefix,
            self.event.rule_name
        )
    }

    pub fn body(&self) -> String {
        match self.kind {
            NotificationKind::Resolved => format!(
                "{} is back within threshold ({} = {:.2}, threshold {:.2})",
                self.event.rule_name, self.event.metric, self.event.value, self.event.threshold
            ),
            _ => self.event.message.clone(),
        }
    }
}
