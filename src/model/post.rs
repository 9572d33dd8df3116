use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct PostDto {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub author_id: i32,
    pub author_handle: Option<String>,
    pub service_type: String,
    pub category: String,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    pub view_count: i64,
    pub like_count: i64,
    pub dislike_count: i64,
    pub comment_count: i64,
    pub bookmark_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct PaginatedPostsDto {
    pub posts: Vec<PostDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreatePostDto {
    pub title: String,
    pub content: String,
    #[serde(default = "default_service_type")]
    pub service_type: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub metadata: Option<serde_json::Value>,
}

fn default_service_type() -> String {
    "community".to_string()
}

fn default_category() -> String {
    "general".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct UpdatePostDto {
    pub title: Option<String>,
    pub content: Option<String>,
    pub service_type: Option<String>,
    pub category: Option<String>,
    #[schema(value_type = Object)]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PostListQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    pub service_type: Option<String>,
    pub category: Option<String>,
    pub author_id: Option<i32>,
    pub search: Option<String>,
}

fn default_per_page() -> u64 {
    10
}

/// Reaction kind requested by the client: `"like"`, `"dislike"` or `"bookmark"`.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ReactionRequestDto {
    pub kind: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ReactionStateDto {
    pub target_type: String,
    pub target_id: i32,
    pub liked: bool,
    pub disliked: bool,
    pub bookmarked: bool,
    pub like_count: i64,
    pub dislike_count: i64,
    pub bookmark_count: i64,
}
