use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        monitoring::{
            AlertEventDto, AlertHistoryQuery, AlertRuleDto, DashboardDto, RuleEnabledDto,
            SuppressRuleDto, UptimeTargetStatusDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::alert::{AlertEvent, AlertRule},
        service::monitoring::MonitoringService,
        state::AppState,
    },
};

/// Tag for grouping monitoring endpoints in OpenAPI documentation
pub static MONITORING_TAG: &str = "monitoring";

const MAX_HISTORY_LIMIT: usize = 500;

fn monitoring(state: &AppState) -> MonitoringService<'_> {
    MonitoringService::new(&state.tracker, &state.uptime, &state.alerting)
}

async fn require_admin(state: &AppState, session: &Session) -> Result<(), AppError> {
    AuthGuard::new(&state.db, session)
        .require(&[Permission::Admin])
        .await?;
    Ok(())
}

fn events_dto(events: Vec<AlertEvent>) -> Vec<AlertEventDto> {
    events.into_iter().map(AlertEvent::into_dto).collect()
}

/// Get the monitoring dashboard.
///
/// Combines the current metrics snapshot, per-endpoint statistics, the slowest recent
/// requests and open alerts.
///
/// # Access Control
/// - `Admin` - Only admins can view monitoring data
#[utoipa::path(
    get,
    path = "/api/monitoring/dashboard",
    tag = MONITORING_TAG,
    responses(
        (status = 200, description = "Dashboard", body = DashboardDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &session).await?;

    let dashboard = monitoring(&state).dashboard(Utc::now()).await;

    Ok((StatusCode::OK, Json(dashboard.into_dto())))
}

/// Evaluate alert rules now.
///
/// # Returns
/// - `200 OK` - Alerts opened, escalated or resolved by this evaluation
#[utoipa::path(
    post,
    path = "/api/monitoring/alerts/evaluate",
    tag = MONITORING_TAG,
    responses(
        (status = 200, description = "Alerts changed by this evaluation", body = Vec<AlertEventDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn evaluate_alerts(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &session).await?;

    let events = monitoring(&state).evaluate_alerts(Utc::now()).await;

    Ok((StatusCode::OK, Json(events_dto(events))))
}

/// Get open alerts, oldest first.
#[utoipa::path(
    get,
    path = "/api/monitoring/alerts",
    tag = MONITORING_TAG,
    responses(
        (status = 200, description = "Open alerts", body = Vec<AlertEventDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn get_active_alerts(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &session).await?;

    let alerts = state.alerting.active_alerts().await;

    Ok((StatusCode::OK, Json(events_dto(alerts))))
}

/// Get recent alert events, newest first.
#[utoipa::path(
    get,
    path = "/api/monitoring/alerts/history",
    tag = MONITORING_TAG,
    params(AlertHistoryQuery),
    responses(
        (status = 200, description = "Alert history", body = Vec<AlertEventDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn get_alert_history(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<AlertHistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &session).await?;

    let history = state
        .alerting
        .history(query.limit.min(MAX_HISTORY_LIMIT))
        .await;

    Ok((StatusCode::OK, Json(events_dto(history))))
}

/// Acknowledge an open alert, stopping its escalation.
#[utoipa::path(
    post,
    path = "/api/monitoring/alerts/{id}/acknowledge",
    tag = MONITORING_TAG,
    params(("id" = u64, Path, description = "Alert ID")),
    responses(
        (status = 200, description = "Alert acknowledged", body = AlertEventDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "No open alert with that ID", body = ErrorDto)
    ),
)]
pub async fn acknowledge_alert(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &session).await?;

    let event = state.alerting.acknowledge(id).await?;

    Ok((StatusCode::OK, Json(event.into_dto())))
}

/// List alert rules ordered by name.
#[utoipa::path(
    get,
    path = "/api/monitoring/rules",
    tag = MONITORING_TAG,
    responses(
        (status = 200, description = "Alert rules", body = Vec<AlertRuleDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn get_rules(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &session).await?;

    let rules: Vec<AlertRuleDto> = state
        .alerting
        .list_rules()
        .await
        .into_iter()
        .map(AlertRule::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(rules)))
}

/// Create or replace an alert rule by name.
///
/// # Returns
/// - `200 OK` - Saved rule
/// - `400 Bad Request` - Unknown condition, severity or channel, or invalid durations
#[utoipa::path(
    put,
    path = "/api/monitoring/rules",
    tag = MONITORING_TAG,
    request_body = AlertRuleDto,
    responses(
        (status = 200, description = "Rule saved", body = AlertRuleDto),
        (status = 400, description = "Invalid rule", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn upsert_rule(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<AlertRuleDto>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &session).await?;

    let rule = state
        .alerting
        .upsert_rule(AlertRule::from_dto(payload)?)
        .await;

    Ok((StatusCode::OK, Json(rule.into_dto())))
}

/// Delete an alert rule and drop its open alert.
#[utoipa::path(
    delete,
    path = "/api/monitoring/rules/{name}",
    tag = MONITORING_TAG,
    params(("name" = String, Path, description = "Rule name")),
    responses(
        (status = 204, description = "Rule deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Rule not found", body = ErrorDto)
    ),
)]
pub async fn delete_rule(
    State(state): State<AppState>,
    session: Session,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &session).await?;

    state.alerting.remove_rule(&name).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Enable or disable an alert rule.
#[utoipa::path(
    put,
    path = "/api/monitoring/rules/{name}/enabled",
    tag = MONITORING_TAG,
    params(("name" = String, Path, description = "Rule name")),
    request_body = RuleEnabledDto,
    responses(
        (status = 200, description = "Rule updated", body = AlertRuleDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Rule not found", body = ErrorDto)
    ),
)]
pub async fn set_rule_enabled(
    State(state): State<AppState>,
    session: Session,
    Path(name): Path<String>,
    Json(payload): Json<RuleEnabledDto>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &session).await?;

    let rule = state.alerting.set_enabled(&name, payload.enabled).await?;

    Ok((StatusCode::OK, Json(rule.into_dto())))
}

/// Suppress a rule until the given time.
#[utoipa::path(
    post,
    path = "/api/monitoring/rules/{name}/suppress",
    tag = MONITORING_TAG,
    params(("name" = String, Path, description = "Rule name")),
    request_body = SuppressRuleDto,
    responses(
        (status = 200, description = "Rule suppressed", body = AlertRuleDto),
        (status = 400, description = "Suppression end is in the past", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Rule not found", body = ErrorDto)
    ),
)]
pub async fn suppress_rule(
    State(state): State<AppState>,
    session: Session,
    Path(name): Path<String>,
    Json(payload): Json<SuppressRuleDto>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &session).await?;

    if payload.until <= Utc::now() {
        return Err(AppError::BadRequest(
            "Suppression end must be in the future".to_string(),
        ));
    }

    let rule = state.alerting.suppress(&name, payload.until).await?;

    Ok((StatusCode::OK, Json(rule.into_dto())))
}

/// Lift a rule's suppression.
#[utoipa::path(
    delete,
    path = "/api/monitoring/rules/{name}/suppress",
    tag = MONITORING_TAG,
    params(("name" = String, Path, description = "Rule name")),
    responses(
        (status = 200, description = "Suppression lifted", body = AlertRuleDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Rule not found", body = ErrorDto)
    ),
)]
pub async fn unsuppress_rule(
    State(state): State<AppState>,
    session: Session,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &session).await?;

    let rule = state.alerting.unsuppress(&name).await?;

    Ok((StatusCode::OK, Json(rule.into_dto())))
}

/// Get the status of every uptime target.
#[utoipa::path(
    get,
    path = "/api/monitoring/uptime",
    tag = MONITORING_TAG,
    responses(
        (status = 200, description = "Uptime status per target", body = Vec<UptimeTargetStatusDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn get_uptime(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &session).await?;

    let status: Vec<UptimeTargetStatusDto> = state
        .uptime
        .status()
        .await
        .into_iter()
        .map(|s| s.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(status)))
}

/// Probe every uptime target now and evaluate alerts with the fresh results.
#[utoipa::path(
    post,
    path = "/api/monitoring/uptime/check",
    tag = MONITORING_TAG,
    responses(
        (status = 200, description = "Uptime status after the check", body = Vec<UptimeTargetStatusDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn check_uptime(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &session).await?;

    let status: Vec<UptimeTargetStatusDto> = state
        .uptime
        .check_all()
        .await
        .into_iter()
        .map(|s| s.into_dto())
        .collect();
    monitoring(&state).evaluate_alerts(Utc::now()).await;

    Ok((StatusCode::OK, Json(status)))
}
