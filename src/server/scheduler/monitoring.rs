use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::{email_verification::EmailVerificationService, monitoring::MonitoringService},
    state::AppState,
};

/// Starts the background monitoring scheduler
///
/// Two jobs are registered:
/// - Every minute, probe all uptime targets and evaluate alert rules with the results
/// - Every hour, purge expired and unverified email verification codes
///
/// # Arguments
/// - `state`: Shared application state; the jobs hold clones of it
pub async fn start_scheduler(state: AppState) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let uptime_state = state.clone();
    let uptime_job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let state = uptime_state.clone();

        Box::pin(async move {
            run_uptime_checks(&state).await;
        })
    })?;

    let purge_state = state.clone();
    let purge_job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let state = purge_state.clone();

        Box::pin(async move {
            if let Err(e) = purge_verification_codes(&state).await {
                tracing::error!("Error purging email verification codes: {}", e);
            }
        })
    })?;

    scheduler.add(uptime_job).await?;
    scheduler.add(purge_job).await?;
    scheduler.start().await?;

    tracing::info!("Monitoring scheduler started");

    Ok(())
}

/// Probes uptime targets, then evaluates alerts so `services_down` is current
async fn run_uptime_checks(state: &AppState) {
    let status = state.uptime.check_all().await;
    let down = status.iter().filter(|s| s.up == Some(false)).count();
    tracing::debug!(targets = status.len(), down, "Uptime check pass finished");

    let events = MonitoringService::new(&state.tracker, &state.uptime, &state.alerting)
        .evaluate_alerts(Utc::now())
        .await;
    if !events.is_empty() {
        tracing::info!(changed = events.len(), "Alert evaluation changed alert state");
    }
}

async fn purge_verification_codes(state: &AppState) -> Result<(), AppError> {
    let purged = EmailVerificationService::new(
        &state.db,
        &state.email_sender,
        state.verification_settings(),
    )
    .purge_expired()
    .await?;

    if purged > 0 {
        tracing::info!(purged, "Purged expired email verification codes");
    }

    Ok(())
}
