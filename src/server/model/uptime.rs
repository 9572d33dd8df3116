//! Uptime probe results and incidents.

use chrono::{DateTime, Utc};

use crate::model::monitoring::{IncidentDto, UptimeTargetStatusDto};

/// Outcome of probing one target once.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub checked_at: DateTime<Utc>,
    pub up: bool,
    /// `None` when no HTTP response was received.
    pub status_code: Option<u16>,
    pub response_ms: u64,
    pub error: Option<String>,
}

/// Continuous period during which a target was down.
#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
    pub started_at: DateTime<Utc>,
    /// `None` while the incident is still open.
    pub ended_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl Incident {
    pub fn duration_seconds(&self) -> Option<i64> {
        self.ended_at
            .map(|ended| (ended - self.started_at).num_seconds())
    }

    pub fn into_dto(self) -> IncidentDto {
        IncidentDto {
            duration_seconds: self.duration_seconds(),
            started_at: self.started_at,
            ended_at: self.ended_at,
            last_error: self.last_error,
        }
    }
}

/// Current state and statistics for one target.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetStatus {
    pub name: String,
    pub url: String,
    /// `None` until the first check completes.
    pub up: Option<bool>,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub last_status_code: Option<u16>,
    pub last_response_ms: Option<u64>,
    /// Share of successful checks in the retained history, 0-100.
    pub uptime_percentage: Option<f64>,
    /// Average response time of successful checks.
    pub avg_response_ms: Option<f64>,
    pub checks: usize,
    pub open_incident: Option<Incident>,
    pub recent_incidents: Vec<Incident>,
}

impl TargetStatus {
    pub fn into_dto(self) -> UptimeTargetStatusDto {
        UptimeTargetStatusDto {
            name: self.name,
            url: self.url,
            up: self.up,
            last_checked_at: self.last_checked_at,
            last_status_code: self.last_status_code,
            last_response_ms: self.last_response_ms,
            uptime_percentage: self.uptime_percentage,
            avg_response_ms: self.avg_response_ms,
            checks: self.checks,
            open_incident: self.open_incident.map(Incident::into_dto),
            recent_incidents: self
                .recent_incidents
                .into_iter()
                .map(Incident::into_dto)
                .collect(),
        }
    }
}
