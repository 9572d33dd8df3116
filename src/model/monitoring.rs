use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct EndpointStatsDto {
    pub method: String,
    pub path: String,
    pub count: u64,
    pub error_count: u64,
    pub avg_ms: f64,
    pub min_ms: u64,
    pub max_ms: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct RequestSampleDto {
    pub method: String,
    pub path: String,
    pub status: u16,
    pub duration_ms: u64,
    pub at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct DashboardDto {
    pub generated_at: DateTime<Utc>,
    pub metrics: BTreeMap<String, f64>,
    pub endpoints: Vec<EndpointStatsDto>,
    pub slow_requests: Vec<RequestSampleDto>,
    pub active_alerts: Vec<AlertEventDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct AlertRuleDto {
    pub name: String,
    pub metric: String,
    /// One of `gt`, `gte`, `lt`, `lte`, `eq`.
    pub condition: String,
    pub threshold: f64,
    /// One of `info`, `warning`, `critical`.
    pub severity: String,
    /// Any of `log`, `discord`, `email`.
    pub channels: Vec<String>,
    pub cooldown_seconds: i64,
    pub escalation_after_seconds: Option<i64>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub suppressed_until: Option<DateTime<Utc>>,
}

fn default_enabled() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct AlertEventDto {
    pub id: u64,
    pub rule_name: String,
    pub metric: String,
    pub value: f64,
    pub threshold: f64,
    pub severity: String,
    pub status: String,
    pub channels: Vec<String>,
    pub message: String,
    pub started_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub acknowledged: bool,
    pub escalated: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct SuppressRuleDto {
    pub until: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct RuleEnabledDto {
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AlertHistoryQuery {
    /// Maximum number of events, newest first (default 50).
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

fn default_history_limit() -> usize {
    50
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct IncidentDto {
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration_seconds: Option<i64>,
    pub last_error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UptimeTargetStatusDto {
    pub name: String,
    pub url: String,
    pub up: Option<bool>,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub last_status_code: Option<u16>,
    pub last_response_ms: Option<u64>,
    pub uptime_percentage: Option<f64>,
    pub avg_response_ms: Option<f64>,
    pub checks: usize,
    pub open_incident: Option<IncidentDto>,
    pub recent_incidents: Vec<IncidentDto>,
}
