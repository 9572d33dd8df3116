//! Combines request metrics, uptime state and alerting for the monitoring API.

use chrono::{DateTime, Utc};

use crate::server::{
    middleware::performance::PerformanceTracker,
    model::{
        alert::AlertEvent,
        monitoring::{Dashboard, MetricsSnapshot, METRIC_SERVICES_DOWN},
    },
    service::{alerting::AlertingService, uptime::UptimeMonitoringService},
};

pub struct MonitoringService<'a> {
    tracker: &'a PerformanceTracker,
    uptime: &'a UptimeMonitoringService,
    alerting: &'a AlertingService,
}

impl<'a> MonitoringService<'a> {
    pub fn new(
        tracker: &'a PerformanceTracker,
        uptime: &'a UptimeMonitoringService,
        alerting: &'a AlertingService,
    ) -> Self {
        Self {
            tracker,
            uptime,
            alerting,
        }
    }

    /// Request metrics merged with the number of uptime targets currently down.
    pub async fn metrics(&self, now: DateTime<Utc>) -> MetricsSnapshot {
        let mut snapshot = self.tracker.snapshot(now);
        snapshot.set(METRIC_SERVICES_DOWN, self.uptime.services_down().await as f64);
        snapshot
    }

    pub async fn dashboard(&self, now: DateTime<Utc>) -> Dashboard {
        Dashboard {
            metrics: self.metrics(now).await,
            endpoints: self.tracker.endpoint_stats(),
            slow_requests: self.tracker.slow_requests(),
            active_alerts: self.alerting.active_alerts().await,
        }
    }

    /// Evaluates alert rules against the current metrics.
    pub async fn evaluate_alerts(&self, now: DateTime<Utc>) -> Vec<AlertEvent> {
        let metrics = self.metrics(now).await;
        self.alerting.evaluate(&metrics, now).await
    }
}
