use std::sync::Arc;

use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower_governor::{
    governor::{GovernorConfig, GovernorConfigBuilder},
    GovernorLayer,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{activity::*, api::*, comment::*, monitoring::*, post::*, user::*},
    server::{
        controller::{
            activity::{self, ACTIVITY_TAG},
            admin::{self, ADMIN_TAG},
            auth::{self, AUTH_TAG},
            comment::{self, COMMENT_TAG},
            health::{self, HEALTH_TAG},
            monitoring::{self, MONITORING_TAG},
            post::{self, POST_TAG},
        },
        middleware::performance::track_performance,
        state::AppState,
    },
};

/// Seconds to replenish one request for the credential and email routes.
const AUTH_REPLENISH_SECONDS: u64 = 2;
const AUTH_BURST_SIZE: u32 = 5;

#[derive(OpenApi)]
#[openapi(
    info(title = "townhall API"),
    paths(
        auth::send_code,
        auth::verify_code,
        auth::register,
        auth::login,
        auth::logout,
        auth::get_user,
        post::list_posts,
        post::create_post,
        post::get_post,
        post::get_post_by_slug,
        post::update_post,
        post::delete_post,
        post::react_to_post,
        post::get_post_reaction,
        comment::list_comments,
        comment::create_comment,
        comment::update_comment,
        comment::delete_comment,
        comment::react_to_comment,
        activity::get_activity_summary,
        activity::get_activity_posts,
        activity::get_activity_comments,
        activity::get_activity_liked,
        activity::get_activity_bookmarks,
        admin::get_all_users,
        admin::set_user_status,
        admin::set_user_admin,
        monitoring::get_dashboard,
        monitoring::evaluate_alerts,
        monitoring::get_active_alerts,
        monitoring::get_alert_history,
        monitoring::acknowledge_alert,
        monitoring::get_rules,
        monitoring::upsert_rule,
        monitoring::delete_rule,
        monitoring::set_rule_enabled,
        monitoring::suppress_rule,
        monitoring::unsuppress_rule,
        monitoring::get_uptime,
        monitoring::check_uptime,
        health::health,
    ),
    components(schemas(
        ErrorDto,
        HealthDto,
        UserDto,
        PaginatedUsersDto,
        SendCodeDto,
        VerifyCodeDto,
        VerificationStatusDto,
        RegisterDto,
        LoginDto,
        SetUserStatusDto,
        SetAdminDto,
        PostDto,
        PaginatedPostsDto,
        CreatePostDto,
        UpdatePostDto,
        ReactionRequestDto,
        ReactionStateDto,
        CommentDto,
        PaginatedCommentsDto,
        CreateCommentDto,
        UpdateCommentDto,
        ActivitySummaryDto,
        ActivityCommentDto,
        PaginatedActivityPostsDto,
        PaginatedActivityCommentsDto,
        DashboardDto,
        EndpointStatsDto,
        RequestSampleDto,
        AlertRuleDto,
        AlertEventDto,
        SuppressRuleDto,
        RuleEnabledDto,
        IncidentDto,
        UptimeTargetStatusDto,
    )),
    tags(
        (name = AUTH_TAG, description = "Email verification, registration and sessions"),
        (name = POST_TAG, description = "Posts and post reactions"),
        (name = COMMENT_TAG, description = "Threaded comments"),
        (name = ACTIVITY_TAG, description = "Per-user activity"),
        (name = ADMIN_TAG, description = "User administration"),
        (name = MONITORING_TAG, description = "Metrics, alerting and uptime"),
        (name = HEALTH_TAG, description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// Builds the complete HTTP router with state applied.
///
/// The session layer is added by the caller. Serve the result with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the rate limiter can key
/// requests by peer address.
pub fn router(state: AppState) -> Router {
    // per-IP limiter for login, registration and verification email routes
    let governor_config = GovernorConfigBuilder::default()
        .per_second(AUTH_REPLENISH_SECONDS)
        .burst_size(AUTH_BURST_SIZE)
        .finish()
        .unwrap_or_else(|| {
            tracing::error!("Invalid auth rate limit settings, using governor defaults");
            GovernorConfig::default()
        });

    let auth_routes = Router::new()
        .route("/api/auth/email/send-code", post(auth::send_code))
        .route("/api/auth/email/verify", post(auth::verify_code))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .layer(GovernorLayer::new(Arc::new(governor_config)));

    let api_routes = Router::new()
        .route("/api/auth/logout", get(auth::logout))
        .route("/api/auth/user", get(auth::get_user))
        .route("/api/posts", get(post::list_posts).post(post::create_post))
        .route(
            "/api/posts/{id}",
            get(post::get_post)
                .put(post::update_post)
                .delete(post::delete_post),
        )
        .route("/api/posts/slug/{slug}", get(post::get_post_by_slug))
        .route(
            "/api/posts/{id}/reactions",
            get(post::get_post_reaction).post(post::react_to_post),
        )
        .route(
            "/api/posts/{id}/comments",
            get(comment::list_comments).post(comment::create_comment),
        )
        .route(
            "/api/comments/{id}",
            put(comment::update_comment).delete(comment::delete_comment),
        )
        .route("/api/comments/{id}/reactions", post(comment::react_to_comment))
        .route("/api/users/{id}/activity", get(activity::get_activity_summary))
        .route("/api/users/{id}/activity/posts", get(activity::get_activity_posts))
        .route(
            "/api/users/{id}/activity/comments",
            get(activity::get_activity_comments),
        )
        .route("/api/users/{id}/activity/liked", get(activity::get_activity_liked))
        .route(
            "/api/users/{id}/activity/bookmarks",
            get(activity::get_activity_bookmarks),
        )
        .route("/api/admin/users", get(admin::get_all_users))
        .route("/api/admin/users/{id}/status", put(admin::set_user_status))
        .route("/api/admin/users/{id}/admin", put(admin::set_user_admin))
        .route("/api/monitoring/dashboard", get(monitoring::get_dashboard))
        .route(
            "/api/monitoring/alerts/evaluate",
            post(monitoring::evaluate_alerts),
        )
        .route("/api/monitoring/alerts", get(monitoring::get_active_alerts))
        .route(
            "/api/monitoring/alerts/history",
            get(monitoring::get_alert_history),
        )
        .route(
            "/api/monitoring/alerts/{id}/acknowledge",
            post(monitoring::acknowledge_alert),
        )
        .route(
            "/api/monitoring/rules",
            get(monitoring::get_rules).put(monitoring::upsert_rule),
        )
        .route(
            "/api/monitoring/rules/{name}",
            axum::routing::delete(monitoring::delete_rule),
        )
        .route(
            "/api/monitoring/rules/{name}/enabled",
            put(monitoring::set_rule_enabled),
        )
        .route(
            "/api/monitoring/rules/{name}/suppress",
            post(monitoring::suppress_rule).delete(monitoring::unsuppress_rule),
        )
        .route("/api/monitoring/uptime", get(monitoring::get_uptime))
        .route("/api/monitoring/uptime/check", post(monitoring::check_uptime))
        .route("/api/health", get(health::health));

    Router::new()
        .merge(auth_routes)
        .merge(api_routes)
        .route_layer(from_fn_with_state(state.tracker.clone(), track_performance))
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&state.config.app_url))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Allows credentialed requests from the frontend at `app_url`.
fn cors_layer(app_url: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, ACCEPT])
        .allow_credentials(true);

    match HeaderValue::from_str(app_url.trim_end_matches('/')) {
        Ok(origin) => cors.allow_origin(AllowOrigin::exact(origin)),
        Err(e) => {
            tracing::warn!(app_url = %app_url, "APP_URL is not a valid origin, CORS disabled: {}", e);
            cors
        }
    }
}
