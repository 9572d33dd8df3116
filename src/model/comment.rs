use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CommentDto {
    pub id: i32,
    pub post_id: i32,
    pub parent_comment_id: Option<i32>,
    pub author_id: i32,
    pub content: String,
    pub subtype: Option<String>,
    pub like_count: i64,
    pub dislike_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[schema(no_recursion)]
    pub replies: Vec<CommentDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct PaginatedCommentsDto {
    pub comments: Vec<CommentDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreateCommentDto {
    pub content: String,
    pub parent_comment_id: Option<i32>,
    /// Optional `"inquiry"` or `"review"` marker stored in the comment metadata.
    pub subtype: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UpdateCommentDto {
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct CommentListQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    pub subtype: Option<String>,
}

fn default_per_page() -> u64 {
    20
}
