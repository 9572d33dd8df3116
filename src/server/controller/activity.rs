use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        activity::{ActivitySummaryDto, PaginatedActivityCommentsDto, PaginatedActivityPostsDto},
        api::{ErrorDto, PaginationQuery},
    },
    server::{error::AppError, service::activity::ActivityService, state::AppState},
};

/// Tag for grouping user activity endpoints in OpenAPI documentation
pub static ACTIVITY_TAG: &str = "activity";

/// Get counts of a user's posts, comments, likes and bookmarks.
///
/// # Access Control
/// - Public
#[utoipa::path(
    get,
    path = "/api/users/{id}/activity",
    tag = ACTIVITY_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Activity summary", body = ActivitySummaryDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_activity_summary(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let summary = ActivityService::new(&state.db).summary(user_id).await?;

    Ok((StatusCode::OK, Json(summary.into_dto())))
}

/// Get a user's active posts, newest first.
#[utoipa::path(
    get,
    path = "/api/users/{id}/activity/posts",
    tag = ACTIVITY_TAG,
    params(
        ("id" = i32, Path, description = "User ID"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "User's posts", body = PaginatedActivityPostsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_activity_posts(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, per_page) = query.clamped();
    let posts = ActivityService::new(&state.db)
        .posts(user_id, page, per_page)
        .await?;

    Ok((StatusCode::OK, Json(posts.into_activity_dto())))
}

/// Get a user's comments, each with the title of its post.
#[utoipa::path(
    get,
    path = "/api/users/{id}/activity/comments",
    tag = ACTIVITY_TAG,
    params(
        ("id" = i32, Path, description = "User ID"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "User's comments", body = PaginatedActivityCommentsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_activity_comments(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, per_page) = query.clamped();
    let comments = ActivityService::new(&state.db)
        .comments(user_id, page, per_page)
        .await?;

    Ok((StatusCode::OK, Json(comments.into_dto())))
}

/// Get the posts a user liked, most recent first.
#[utoipa::path(
    get,
    path = "/api/users/{id}/activity/liked",
    tag = ACTIVITY_TAG,
    params(
        ("id" = i32, Path, description = "User ID"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Liked posts", body = PaginatedActivityPostsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_activity_liked(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, per_page) = query.clamped();
    let posts = ActivityService::new(&state.db)
        .liked_posts(user_id, page, per_page)
        .await?;

    Ok((StatusCode::OK, Json(posts.into_activity_dto())))
}

/// Get the posts a user bookmarked, most recent first.
#[utoipa::path(
    get,
    path = "/api/users/{id}/activity/bookmarks",
    tag = ACTIVITY_TAG,
    params(
        ("id" = i32, Path, description = "User ID"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Bookmarked posts", body = PaginatedActivityPostsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_activity_bookmarks(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, per_page) = query.clamped();
    let posts = ActivityService::new(&state.db)
        .bookmarked_posts(user_id, page, per_page)
        .await?;

    Ok((StatusCode::OK, Json(posts.into_activity_dto())))
}
