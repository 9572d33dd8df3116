use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MAX_PER_PAGE},
        comment::{CommentDto, CommentListQuery, CreateCommentDto, PaginatedCommentsDto, UpdateCommentDto},
        post::{ReactionRequestDto, ReactionStateDto},
    },
    server::{
        controller::post::parse_reaction_kind,
        error::AppError,
        middleware::auth::AuthGuard,
        model::comment::{CommentSubtype, CreateCommentParams},
        service::comment::CommentService,
        state::AppState,
    },
};

/// Tag for grouping comment endpoints in OpenAPI documentation
pub static COMMENT_TAG: &str = "comment";

/// List a post's comments as threads.
///
/// Each top-level comment carries its replies down to the maximum depth. Inquiries are
/// only included for their author, the post author and admins; anonymous callers never
/// see them.
///
/// # Access Control
/// - Public; the session user, if any, widens inquiry visibility
///
/// # Returns
/// - `200 OK` - Page of top-level comments with nested replies
/// - `400 Bad Request` - Unknown subtype filter
/// - `404 Not Found` - Post missing or deleted
#[utoipa::path(
    get,
    path = "/api/posts/{id}/comments",
    tag = COMMENT_TAG,
    params(
        ("id" = i32, Path, description = "Post ID"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("per_page" = Option<u64>, Query, description = "Top-level comments per page (default: 20, max: 100)"),
        ("subtype" = Option<String>, Query, description = "Only top-level comments of this subtype")
    ),
    responses(
        (status = 200, description = "Comment threads", body = PaginatedCommentsDto),
        (status = 400, description = "Unknown subtype", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_comments(
    State(state): State<AppState>,
    session: Session,
    Path(post_id): Path<i32>,
    Query(query): Query<CommentListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).optional().await?;

    let subtype = match query.subtype.as_deref() {
        Some(value) => Some(CommentSubtype::parse(value).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown comment subtype '{}'", value))
        })?),
        None => None,
    };

    let comments = CommentService::new(&state.db, state.config.comment_max_depth)
        .list_for_post(
            viewer.as_ref(),
            post_id,
            subtype,
            query.page,
            query.per_page.clamp(1, MAX_PER_PAGE),
        )
        .await?;

    Ok((StatusCode::OK, Json(comments.into_dto())))
}

/// Comment on a post or reply to a comment.
///
/// # Access Control
/// - Any logged in, non-suspended user
///
/// # Returns
/// - `201 Created` - The new comment
/// - `400 Bad Request` - Empty content, unknown subtype, parent on another post, or
///   reply too deep
/// - `404 Not Found` - Post or parent missing
#[utoipa::path(
    post,
    path = "/api/posts/{id}/comments",
    tag = COMMENT_TAG,
    params(("id" = i32, Path, description = "Post ID")),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created", body = CommentDto),
        (status = 400, description = "Invalid comment", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Post or parent comment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_comment(
    State(state): State<AppState>,
    session: Session,
    Path(post_id): Path<i32>,
    Json(payload): Json<CreateCommentDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    let params = CreateCommentParams::from_dto(post_id, payload)?;

    let comment = CommentService::new(&state.db, state.config.comment_max_depth)
        .create(&user, params)
        .await?;

    Ok((StatusCode::CREATED, Json(comment.into_dto(Vec::new()))))
}

/// Edit a comment.
///
/// # Access Control
/// - The comment author only
#[utoipa::path(
    put,
    path = "/api/comments/{id}",
    tag = COMMENT_TAG,
    params(("id" = i32, Path, description = "Comment ID")),
    request_body = UpdateCommentDto,
    responses(
        (status = 200, description = "Comment updated", body = CommentDto),
        (status = 400, description = "Empty content", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the author", body = ErrorDto),
        (status = 404, description = "Comment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_comment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCommentDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let comment = CommentService::new(&state.db, state.config.comment_max_depth)
        .update(&user, id, payload.content)
        .await?;

    Ok((StatusCode::OK, Json(comment.into_dto(Vec::new()))))
}

/// Soft delete a comment.
///
/// # Access Control
/// - The comment author, the post author, or an admin
#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    tag = COMMENT_TAG,
    params(("id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not allowed to delete this comment", body = ErrorDto),
        (status = 404, description = "Comment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    CommentService::new(&state.db, state.config.comment_max_depth)
        .delete(&user, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Toggle a like or dislike on a comment.
#[utoipa::path(
    post,
    path = "/api/comments/{id}/reactions",
    tag = COMMENT_TAG,
    params(("id" = i32, Path, description = "Comment ID")),
    request_body = ReactionRequestDto,
    responses(
        (status = 200, description = "Reaction toggled", body = ReactionStateDto),
        (status = 400, description = "Unknown kind or bookmark on a comment", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Comment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn react_to_comment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<ReactionRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    let kind = parse_reaction_kind(&payload.kind)?;

    let reaction = CommentService::new(&state.db, state.config.comment_max_depth)
        .react(&user, id, kind)
        .await?;

    Ok((StatusCode::OK, Json(reaction.into_dto())))
}
