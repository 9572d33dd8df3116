//! Rule-based alerting over request and uptime metrics.
//!
//! `AlertingService` holds its rules, open alerts, cooldown timestamps and a bounded
//! event history in memory behind a `tokio::sync::RwLock`. Evaluation runs on demand
//! (API call) and after every uptime check pass. Notifications are collected while the
//! lock is held and delivered after it is released; delivery failures are logged and
//! never fail an evaluation.

use chrono::{DateTime, Duration, Utc};
use std::{
    collections::{BTreeMap, HashMap, VecDeque},
    sync::Arc,
};
use tokio::sync::RwLock;

use crate::server::{
    error::AppError,
    model::{
        alert::{
            AlertChannel, AlertCondition, AlertEvent, AlertNotification, AlertRule,
            AlertSeverity, AlertStatus, NotificationKind,
        },
        monitoring::{
            MetricsSnapshot, METRIC_AVG_RESPONSE_MS, METRIC_ERROR_RATE,
            METRIC_REQUESTS_PER_MINUTE, METRIC_SERVICES_DOWN,
        },
    },
    service::notification::Notifier,
};

/// Maximum number of alert events retained in history.
pub const HISTORY_CAPACITY: usize = 500;

const DEFAULT_COOLDOWN_SECONDS: i64 = 300;
const DEFAULT_ESCALATION_SECONDS: i64 = 900;

/// Rules installed on startup.
pub fn default_rules() -> Vec<AlertRule> {
    let rule = |name: &str,
                metric: &str,
                threshold: f64,
                severity: AlertSeverity,
                channels: Vec<AlertChannel>| AlertRule {
        name: name.to_string(),
        metric: metric.to_string(),
        condition: AlertCondition::GreaterThan,
        threshold,
        severity,
        channels,
        cooldown: Duration::seconds(DEFAULT_COOLDOWN_SECONDS),
        escalation_after: (severity > AlertSeverity::Info)
            .then(|| Duration::seconds(DEFAULT_ESCALATION_SECONDS)),
        enabled: true,
        suppressed_until: None,
    };

    vec![
        rule(
            "high_error_rate",
            METRIC_ERROR_RATE,
            5.0,
            AlertSeverity::Warning,
            vec![AlertChannel::Log, AlertChannel::Discord],
        ),
        rule(
            "slow_response_time",
            METRIC_AVG_RESPONSE_MS,
            1000.0,
            AlertSeverity::Warning,
            vec![AlertChannel::Log],
        ),
        rule(
            "service_down",
            METRIC_SERVICES_DOWN,
            0.0,
            AlertSeverity::Critical,
            vec![AlertChannel::Log, AlertChannel::Discord, AlertChannel::Email],
        ),
        rule(
            "high_request_rate",
            METRIC_REQUESTS_PER_MINUTE,
            1000.0,
            AlertSeverity::Info,
            vec![AlertChannel::Log],
        ),
    ]
}

#[derive(Default)]
struct AlertState {
    rules: BTreeMap<String, AlertRule>,
    /// Open alert per rule name.
    active: HashMap<String, AlertEvent>,
    /// Last notification time per rule name.
    last_notified: HashMap<String, DateTime<Utc>>,
    history: VecDeque<AlertEvent>,
    next_id: u64,
}

impl AlertState {
    fn record_history(&mut self, event: &AlertEvent) {
        if let Some(existing) = self.history.iter_mut().find(|e| e.id == event.id) {
            *existing = event.clone();
            return;
        }
        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(event.clone());
    }

    fn rule_mut(&mut self, name: &str) -> Result<&mut AlertRule, AppError> {
        self.rules
            .get_mut(name)
            .ok_or_else(|| AppError::NotFound(format!("Alert rule '{}' not found", name)))
    }
}

type Outbox = Vec<(Vec<AlertChannel>, AlertNotification)>;

/// Shared alert rule engine.
#[derive(Clone)]
pub struct AlertingService {
    state: Arc<RwLock<AlertState>>,
    notifier: Arc<dyn Notifier>,
}

impl AlertingService {
    /// Creates the service with the default rule set.
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self::with_rules(notifier, default_rules())
    }

    pub fn with_rules(notifier: Arc<dyn Notifier>, rules: Vec<AlertRule>) -> Self {
        let state = AlertState {
            rules: rules.into_iter().map(|r| (r.name.clone(), r)).collect(),
            next_id: 1,
            ..Default::default()
        };

        Self {
            state: Arc::new(RwLock::new(state)),
            notifier,
        }
    }

    /// All rules ordered by name.
    pub async fn list_rules(&self) -> Vec<AlertRule> {
        self.state.read().await.rules.values().cloned().collect()
    }

    /// Inserts or replaces the rule with the same name.
    pub async fn upsert_rule(&self, rule: AlertRule) -> AlertRule {
        let mut state = self.state.write().await;
        tracing::info!(rule = %rule.name, metric = %rule.metric, "Alert rule saved");
        state.rules.insert(rule.name.clone(), rule.clone());
        rule
    }

    /// Removes a rule together with its open alert and cooldown.
    ///
    /// # Returns
    /// - `Ok(())` - Rule removed
    /// - `Err(AppError::NotFound)` - No rule with that name
    pub async fn remove_rule(&self, name: &str) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        if state.rules.remove(name).is_none() {
            return Err(AppError::NotFound(format!("Alert rule '{}' not found", name)));
        }
        state.active.remove(name);
        state.last_notified.remove(name);
        tracing::info!(rule = name, "Alert rule removed");

        Ok(())
    }

    pub async fn set_enabled(&self, name: &str, enabled: bool) -> Result<AlertRule, AppError> {
        let mut state = self.state.write().await;
        let rule = state.rule_mut(name)?;
        rule.enabled = enabled;
        Ok(rule.clone())
    }

    /// Silences a rule until `until`; evaluation skips it entirely meanwhile.
    pub async fn suppress(&self, name: &str, until: DateTime<Utc>) -> Result<AlertRule, AppError> {
        let mut state = self.state.write().await;
        let rule = state.rule_mut(name)?;
        rule.suppressed_until = Some(until);
        tracing::info!(rule = name, until = %until, "Alert rule suppressed");
        Ok(rule.clone())
    }

    pub async fn unsuppress(&self, name: &str) -> Result<AlertRule, AppError> {
        let mut state = self.state.write().await;
        let rule = state.rule_mut(name)?;
        rule.suppressed_until = None;
        Ok(rule.clone())
    }

    /// Marks an open alert as acknowledged, which stops its escalation.
    ///
    /// # Returns
    /// - `Ok(AlertEvent)` - The acknowledged alert
    /// - `Err(AppError::NotFound)` - No open alert with that ID
    pub async fn acknowledge(&self, alert_id: u64) -> Result<AlertEvent, AppError> {
        let mut state = self.state.write().await;
        let event = state
            .active
            .values_mut()
            .find(|e| e.id == alert_id)
            .ok_or_else(|| AppError::NotFound(format!("Active alert {} not found", alert_id)))?;
        event.acknowledged = true;
        let event = event.clone();
        state.record_history(&event);

        Ok(event)
    }

    /// Open alerts, oldest first.
    pub async fn active_alerts(&self) -> Vec<AlertEvent> {
        let state = self.state.read().await;
        let mut alerts: Vec<AlertEvent> = state.active.values().cloned().collect();
        alerts.sort_by(|a, b| a.started_at.cmp(&b.started_at).then(a.id.cmp(&b.id)));
        alerts
    }

    /// Up to `limit` most recent events, newest first.
    pub async fn history(&self, limit: usize) -> Vec<AlertEvent> {
        let state = self.state.read().await;
        state.history.iter().rev().take(limit).cloned().collect()
    }

    /// Evaluates every enabled rule against `metrics`.
    ///
    /// # Arguments
    /// - `metrics` - Current metric values; rules whose metric is absent are skipped
    /// - `now` - Evaluation time used for cooldown, escalation and suppression
    ///
    /// # Returns
    /// - `Vec<AlertEvent>` - Alerts opened, escalated or resolved by this pass
    pub async fn evaluate(&self, metrics: &MetricsSnapshot, now: DateTime<Utc>) -> Vec<AlertEvent> {
        let (changed, outbox) = {
            let mut state = self.state.write().await;
            Self::evaluate_locked(&mut state, metrics, now)
        };

        self.deliver(outbox).await;

        changed
    }

    fn evaluate_locked(
        state: &mut AlertState,
        metrics: &MetricsSnapshot,
        now: DateTime<Utc>,
    ) -> (Vec<AlertEvent>, Outbox) {
        let mut changed = Vec::new();
        let mut outbox = Outbox::new();

        let rules: Vec<AlertRule> = state.rules.values().cloned().collect();
        for rule in rules {
            if !rule.enabled || rule.is_suppressed(now) {
                continue;
            }
            let Some(value) = metrics.get(&rule.metric) else {
                continue;
            };
            let firing = rule.condition.is_met(value, rule.threshold);

            match (firing, state.active.get(&rule.name).cloned()) {
                (true, None) => {
                    let cooling_down = state
                        .last_notified
                        .get(&rule.name)
                        .is_some_and(|last| now - *last < rule.cooldown);
                    if cooling_down {
                        tracing::debug!(rule = %rule.name, "Alert condition met during cooldown");
                        continue;
                    }

                    let event = AlertEvent {
                        id: state.next_id,
                        rule_name: rule.name.clone(),
                        metric: rule.metric.clone(),
                        value,
                        threshold: rule.threshold,
                        severity: rule.severity,
                        status: AlertStatus::Active,
                        channels: rule.channels.clone(),
                        message: format!(
                            "{} is {:.2} ({} {:.2})",
                            rule.metric,
                            value,
                            rule.condition.as_str(),
                            rule.threshold
                        ),
                        started_at: now,
                        resolved_at: None,
                        acknowledged: false,
                        escalated: false,
                    };
                    state.next_id += 1;
                    state.last_notified.insert(rule.name.clone(), now);
                    state.active.insert(rule.name.clone(), event.clone());
                    state.record_history(&event);

                    outbox.push((
                        event.channels.clone(),
                        AlertNotification {
                            kind: NotificationKind::Triggered,
                            event: event.clone(),
                        },
                    ));
                    changed.push(event);
                }
                (true, Some(mut event)) => {
                    event.value = value;

                    let due = rule
                        .escalation_after
                        .is_some_and(|after| now - event.started_at >= after);
                    if due && !event.acknowledged && !event.escalated {
                        event.escalated = true;
                        event.severity = event.severity.escalate();
                        for channel in [AlertChannel::Discord, AlertChannel::Email] {
                            if !event.channels.contains(&channel) {
                                event.channels.push(channel);
                            }
                        }
                        state.last_notified.insert(rule.name.clone(), now);
                        tracing::warn!(rule = %rule.name, alert_id = event.id, "Alert escalated");

                        outbox.push((
                            event.channels.clone(),
                            AlertNotification {
                                kind: NotificationKind::Escalated,
                                event: event.clone(),
                            },
                        ));
                        changed.push(event.clone());
                    }

                    state.record_history(&event);
                    state.active.insert(rule.name.clone(), event);
                }
                (false, Some(mut event)) => {
                    event.value = value;
                    event.status = AlertStatus::Resolved;
                    event.resolved_at = Some(now);
                    state.active.remove(&rule.name);
                    state.record_history(&event);

                    outbox.push((
                        rule.channels.clone(),
                        AlertNotification {
                            kind: NotificationKind::Resolved,
                            event: event.clone(),
                        },
                    ));
                    changed.push(event);
                }
                (false, None) => {}
            }
        }

        (changed, outbox)
    }

    async fn deliver(&self, outbox: Outbox) {
        for (channels, notification) in outbox {
            for channel in channels {
                if let Err(e) = self.notifier.notify(channel, &notification).await {
                    tracing::warn!(
                        rule = %notification.event.rule_name,
                        channel = channel.as_str(),
                        "Failed to deliver alert notification: {}",
                        e
                    );
                }
            }
        }
    }
}
