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
        post::{
            CreatePostDto, PaginatedPostsDto, PostDto, PostListQuery, ReactionRequestDto,
            ReactionStateDto, UpdatePostDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            post::{CreatePostParams, PostFilter, UpdatePostParams},
            reaction::ReactionKind,
        },
        service::post::PostService,
        state::AppState,
    },
};

/// Tag for grouping post endpoints in OpenAPI documentation
pub static POST_TAG: &str = "post";

/// List active posts.
///
/// Returns posts newest first. All given filters must match; `search` matches title or
/// content case-insensitively.
///
/// # Access Control
/// - Public
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `query` - Filters and pagination (`page` is zero-based)
///
/// # Returns
/// - `200 OK` - Page of posts with author handles
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = POST_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("per_page" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("service_type" = Option<String>, Query, description = "Filter by service type"),
        ("category" = Option<String>, Query, description = "Filter by category"),
        ("author_id" = Option<i32>, Query, description = "Filter by author"),
        ("search" = Option<String>, Query, description = "Search title and content")
    ),
    responses(
        (status = 200, description = "Page of posts", body = PaginatedPostsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let per_page = query.per_page.clamp(1, MAX_PER_PAGE);
    let posts = PostService::new(&state.db)
        .list(PostFilter::from_query(&query), query.page, per_page)
        .await?;

    Ok((StatusCode::OK, Json(posts.into_dto())))
}

/// Create a post.
///
/// # Access Control
/// - Any logged in, non-suspended user
///
/// # Returns
/// - `201 Created` - The new post including its slug
/// - `400 Bad Request` - Invalid title, content, labels or metadata
/// - `401 Unauthorized` - Not logged in
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = POST_TAG,
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Invalid post data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_post(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreatePostDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let post = PostService::new(&state.db)
        .create(&user, CreatePostParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(post.into_dto())))
}

/// Get a post by ID. Counts as a view.
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = POST_TAG,
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "The post", body = PostDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let post = PostService::new(&state.db).get_by_id(id).await?;

    Ok((StatusCode::OK, Json(post.into_dto())))
}

/// Get a post by slug. Counts as a view.
#[utoipa::path(
    get,
    path = "/api/posts/slug/{slug}",
    tag = POST_TAG,
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "The post", body = PostDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_post_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post = PostService::new(&state.db).get_by_slug(&slug).await?;

    Ok((StatusCode::OK, Json(post.into_dto())))
}

/// Update a post.
///
/// Only provided fields change.
///
/// # Access Control
/// - The post author or an admin
///
/// # Returns
/// - `200 OK` - Updated post
/// - `400 Bad Request` - Invalid field values
/// - `401 Unauthorized` - Not logged in
/// - `403 Forbidden` - Neither author nor admin
/// - `404 Not Found` - Post missing or deleted
#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = POST_TAG,
    params(("id" = i32, Path, description = "Post ID")),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = PostDto),
        (status = 400, description = "Invalid post data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the author or an admin", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_post(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePostDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let post = PostService::new(&state.db)
        .update(&user, UpdatePostParams::from_dto(id, payload))
        .await?;

    Ok((StatusCode::OK, Json(post.into_dto())))
}

/// Soft delete a post.
///
/// # Access Control
/// - The post author or an admin
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = POST_TAG,
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the author or an admin", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_post(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    PostService::new(&state.db).delete(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Toggle a like, dislike or bookmark on a post.
///
/// # Access Control
/// - Any logged in, non-suspended user
///
/// # Returns
/// - `200 OK` - The caller's flags and the post's counters
/// - `400 Bad Request` - Unknown reaction kind
/// - `404 Not Found` - Post missing or deleted
#[utoipa::path(
    post,
    path = "/api/posts/{id}/reactions",
    tag = POST_TAG,
    params(("id" = i32, Path, description = "Post ID")),
    request_body = ReactionRequestDto,
    responses(
        (status = 200, description = "Reaction toggled", body = ReactionStateDto),
        (status = 400, description = "Unknown reaction kind", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn react_to_post(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<ReactionRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    let kind = parse_reaction_kind(&payload.kind)?;

    let reaction = PostService::new(&state.db).react(&user, id, kind).await?;

    Ok((StatusCode::OK, Json(reaction.into_dto())))
}

/// Get the caller's reaction flags on a post.
#[utoipa::path(
    get,
    path = "/api/posts/{id}/reactions",
    tag = POST_TAG,
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Reaction state", body = ReactionStateDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_post_reaction(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let reaction = PostService::new(&state.db).get_reaction(&user, id).await?;

    Ok((StatusCode::OK, Json(reaction.into_dto())))
}

pub(super) fn parse_reaction_kind(value: &str) -> Result<ReactionKind, AppError> {
    ReactionKind::parse(value)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown reaction kind '{}'", value)))
}
