//! Request performance metrics and the monitoring dashboard.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::{
    model::monitoring::{DashboardDto, EndpointStatsDto, RequestSampleDto},
    server::model::alert::AlertEvent,
};

pub const METRIC_TOTAL_REQUESTS: &str = "total_requests";
/// Percentage (0-100) of requests that returned a 5xx status.
pub const METRIC_ERROR_RATE: &str = "error_rate";
pub const METRIC_AVG_RESPONSE_MS: &str = "avg_response_ms";
pub const METRIC_P95_RESPONSE_MS: &str = "p95_response_ms";
/// Requests completed during the last 60 seconds.
pub const METRIC_REQUESTS_PER_MINUTE: &str = "requests_per_minute";
pub const METRIC_SERVICES_DOWN: &str = "services_down";

/// Point-in-time metric values keyed by metric name, used for alert rule evaluation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricsSnapshot {
    pub generated_at: DateTime<Utc>,
    pub values: BTreeMap<String, f64>,
}

impl MetricsSnapshot {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, metric: &str, value: f64) -> Self {
        self.set(metric, value);
        self
    }

    pub fn set(&mut self, metric: &str, value: f64) {
        self.values.insert(metric.to_string(), value);
    }

    pub fn get(&self, metric: &str) -> Option<f64> {
        self.values.get(metric).copied()
    }
}

/// Aggregated timings for one `(method, route)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointStats {
    pub method: String,
    pub path: String,
    pub count: u64,
    /// Responses with status >= 500.
    pub error_count: u64,
    pub total_ms: u64,
    pub min_ms: u64,
    pub max_ms: u64,
}

impl EndpointStats {
    pub fn new(method: String, path: String) -> Self {
        Self {
            method,
            path,
            count: 0,
            error_count: 0,
            total_ms: 0,
            min_ms: u64::MAX,
            max_ms: 0,
        }
    }

    pub fn record(&mut self, status: u16, duration_ms: u64) {
        self.count += 1;
        if status >= 500 {
            self.error_count += 1;
        }
        self.total_ms = self.total_ms.saturating_add(duration_ms);
        self.min_ms = self.min_ms.min(duration_ms);
        self.max_ms = self.max_ms.max(duration_ms);
    }

    pub fn avg_ms(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_ms as f64 / self.count as f64
        }
    }

    pub fn into_dto(self) -> EndpointStatsDto {
        let avg_ms = self.avg_ms();
        EndpointStatsDto {
            method: self.method,
            path: self.path,
            count: self.count,
            error_count: self.error_count,
            avg_ms,
            min_ms: if self.count == 0 { 0 } else { self.min_ms },
            max_ms: self.max_ms,
        }
    }
}

/// A single completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSample {
    pub method: String,
    pub path: String,
    pub status: u16,
    pub duration_ms: u64,
    pub at: DateTime<Utc>,
}

impl RequestSample {
    pub fn into_dto(self) -> RequestSampleDto {
        RequestSampleDto {
            method: self.method,
            path: self.path,
            status: self.status,
            duration_ms: self.duration_ms,
            at: self.at,
        }
    }
}

/// Everything the monitoring dashboard shows at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub metrics: MetricsSnapshot,
    pub endpoints: Vec<EndpointStats>,
    pub slow_requests: Vec<RequestSample>,
    pub active_alerts: Vec<AlertEvent>,
}

impl Dashboard {
    pub fn into_dto(self) -> DashboardDto {
        DashboardDto {
            generated_at: self.metrics.generated_at,
            metrics: self.metrics.values,
            endpoints: self.endpoints.into_iter().map(EndpointStats::into_dto).collect(),
            slow_requests: self
                .slow_requests
                .into_iter()
                .map(RequestSample::into_dto)
                .collect(),
            active_alerts: self
                .active_alerts
                .into_iter()
                .map(AlertEvent::into_dto)
                .collect(),
        }
    }
}
