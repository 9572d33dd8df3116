use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginationQuery},
        user::{PaginatedUsersDto, SetAdminDto, SetUserStatusDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::user::{SetAdminParam, SetStatusParam, UserStatus},
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping admin endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

/// Get paginated users.
///
/// Returns all accounts ordered by handle.
///
/// # Access Control
/// - `Admin` - Only admins can list users
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `query` - Pagination parameters
///
/// # Returns
/// - `200 OK` - Page of users
/// - `401 Unauthorized` - Not logged in
/// - `403 Forbidden` - Not an admin
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = ADMIN_TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of users", body = PaginatedUsersDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_users(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let (page, per_page) = query.clamped();
    let users = UserService::new(&state.db)
        .get_all_users(page, per_page)
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto())))
}

/// Suspend or reactivate an account.
///
/// Suspended users cannot log in and their existing sessions stop authenticating.
///
/// # Access Control
/// - `Admin` - Admins cannot suspend themselves
///
/// # Returns
/// - `200 OK` - Updated user
/// - `400 Bad Request` - Unknown status or self-suspension
/// - `404 Not Found` - User does not exist
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/status",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = SetUserStatusDto,
    responses(
        (status = 200, description = "Status updated", body = UserDto),
        (status = 400, description = "Unknown status or self-suspension", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_user_status(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(payload): Json<SetUserStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let status = UserStatus::parse(&payload.status).ok_or_else(|| {
        AppError::BadRequest(format!("Unknown user status '{}'", payload.status))
    })?;

    let user = UserService::new(&state.db)
        .set_status(&admin, SetStatusParam { user_id, status })
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Grant or revoke admin.
///
/// # Access Control
/// - `Admin` - Admins cannot revoke their own admin status
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/admin",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = SetAdminDto,
    responses(
        (status = 200, description = "Admin status updated", body = UserDto),
        (status = 400, description = "Self-revocation", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_user_admin(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(payload): Json<SetAdminDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db)
        .set_admin(
            &admin,
            SetAdminParam {
                user_id,
                is_admin: payload.admin,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
