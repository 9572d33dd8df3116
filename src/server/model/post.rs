//! Post domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::{
        activity::PaginatedActivityPostsDto,
        post::{CreatePostDto, PaginatedPostsDto, PostDto, PostListQuery, UpdatePostDto},
    },
    server::model::pagination::Paginated,
};

/// Soft-delete state shared by posts and comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentStatus {
    Active,
    Deleted,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deleted => "deleted",
        }
    }

    pub fn from_db(value: &str) -> Self {
        match value {
            "active" => Self::Active,
            _ => Self::Deleted,
        }
    }
}

/// Community post with engagement counters.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    /// `slugify(title)-{id}`, unique across posts.
    pub slug: String,
    pub author_id: i32,
    pub service_type: String,
    pub category: String,
    /// Free-form JSON object supplied by the client.
    pub metadata: serde_json::Value,
    pub view_count: i64,
    pub like_count: i64,
    pub dislike_count: i64,
    pub comment_count: i64,
    pub bookmark_count: i64,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Converts an entity model to a post domain model at the repository boundary.
    pub fn from_entity(entity: entity::post::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            content: entity.content,
            slug: entity.slug,
            author_id: entity.author_id,
            service_type: entity.service_type,
            category: entity.category,
            metadata: entity.metadata,
            view_count: entity.view_count,
            like_count: entity.like_count,
            dislike_count: entity.dislike_count,
            comment_count: entity.comment_count,
            bookmark_count: entity.bookmark_count,
            status: ContentStatus::from_db(&entity.status),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Converts the post to a DTO without author details.
    pub fn into_dto(self) -> PostDto {
        PostWithAuthor {
            post: self,
            author_handle: None,
        }
        .into_dto()
    }
}

/// Post paired with its author's handle for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PostWithAuthor {
    pub post: Post,
    /// `None` when the author row could not be loaded.
    pub author_handle: Option<String>,
}

impl PostWithAuthor {
    pub fn into_dto(self) -> PostDto {
        let post = self.post;
        PostDto {
            id: post.id,
            title: post.title,
            content: post.content,
            slug: post.slug,
            author_id: post.author_id,
            author_handle: self.author_handle,
            service_type: post.service_type,
            category: post.category,
            metadata: post.metadata,
            view_count: post.view_count,
            like_count: post.like_count,
            dislike_count: post.dislike_count,
            comment_count: post.comment_count,
            bookmark_count: post.bookmark_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl Paginated<PostWithAuthor> {
    pub fn into_dto(self) -> PaginatedPostsDto {
        PaginatedPostsDto {
            posts: self.items.into_iter().map(PostWithAuthor::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

impl Paginated<Post> {
    pub fn into_activity_dto(self) -> PaginatedActivityPostsDto {
        PaginatedActivityPostsDto {
            posts: self.items.into_iter().map(Post::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Parameters for creating a post.
#[derive(Debug, Clone)]
pub struct CreatePostParams {
    pub author_id: i32,
    pub title: String,
    pub content: String,
    pub service_type: String,
    pub category: String,
    pub metadata: serde_json::Value,
}

impl CreatePostParams {
    /// Converts the request body; the author is filled in by the service.
    pub fn from_dto(dto: CreatePostDto) -> Self {
        Self {
            author_id: 0,
            title: dto.title,
            content: dto.content,
            service_type: dto.service_type,
            category: dto.category,
            metadata: dto.metadata.unwrap_or(serde_json::Value::Null),
        }
    }
}

/// Parameters for a partial post update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdatePostParams {
    pub id: i32,
    pub title: Option<String>,
    pub content: Option<String>,
    pub service_type: Option<String>,
    pub category: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl UpdatePostParams {
    pub fn from_dto(id: i32, dto: UpdatePostDto) -> Self {
        Self {
            id,
            title: dto.title,
            content: dto.content,
            service_type: dto.service_type,
            category: dto.category,
            metadata: dto.metadata,
        }
    }
}

/// Optional filters for post listings; all present filters must match.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub service_type: Option<String>,
    pub category: Option<String>,
    pub author_id: Option<i32>,
    /// Case-insensitive substring match against title or content.
    pub search: Option<String>,
}

impl PostFilter {
    /// Builds the filter from list query parameters, ignoring blank values.
    pub fn from_query(query: &PostListQuery) -> Self {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            service_type: non_blank(&query.service_type),
            category: non_blank(&query.category),
            author_id: query.author_id,
            search: non_blank(&query.search),
        }
    }
}

/// Counter columns on a post that can be adjusted atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostCounter {
    View,
    Like,
    Dislike,
    Comment,
    Bookmark,
}

impl PostCounter {
    pub fn column(&self) -> entity::post::Column {
        match self {
            Self::View => entity::post::Column::ViewCount,
            Self::Like => entity::post::Column::LikeCount,
            Self::Dislike => entity::post::Column::DislikeCount,
            Self::Comment => entity::post::Column::CommentCount,
            Self::Bookmark => entity::post::Column::BookmarkCount,
        }
    }
}
