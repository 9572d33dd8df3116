//! Application state shared across all request handlers.
//!
//! `AppState` is built once during startup and cloned into every handler through Axum's
//! state extraction. Every field is cheap to clone: the database connection is a pool
//! and the services keep their shared state behind `Arc`.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::{
    config::Config,
    middleware::performance::PerformanceTracker,
    model::email_verification::VerificationSettings,
    service::{alerting::AlertingService, email::EmailSender, uptime::UptimeMonitoringService},
};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// Outbound HTTP client, configured without redirects. Used by uptime probes.
    pub http_client: reqwest::Client,

    pub config: Arc<Config>,

    pub email_sender: EmailSender,

    /// Request metrics recorded by the performance middleware.
    pub tracker: PerformanceTracker,

    pub uptime: UptimeMonitoringService,

    pub alerting: AlertingService,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        config: Arc<Config>,
        email_sender: EmailSender,
        tracker: PerformanceTracker,
        uptime: UptimeMonitoringService,
        alerting: AlertingService,
    ) -> Self {
        Self {
            db,
            http_client,
            config,
            email_sender,
            tracker,
            uptime,
            alerting,
        }
    }

    /// Email verification limits taken from configuration.
    pub fn verification_settings(&self) -> VerificationSettings {
        VerificationSettings {
            ttl: self.config.email_code_ttl,
            max_attempts: self.config.email_code_max_attempts,
        }
    }
}
