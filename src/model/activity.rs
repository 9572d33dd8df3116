use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::post::PostDto;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ActivitySummaryDto {
    pub user_id: i32,
    pub handle: String,
    pub post_count: u64,
    pub comment_count: u64,
    pub liked_post_count: u64,
    pub bookmarked_post_count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ActivityCommentDto {
    pub id: i32,
    pub post_id: i32,
    pub post_title: Option<String>,
    pub post_slug: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct PaginatedActivityPostsDto {
    pub posts: Vec<PostDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct PaginatedActivityCommentsDto {
    pub comments: Vec<ActivityCommentDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
