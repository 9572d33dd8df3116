//! Aggregated per-user activity views.

use crate::{
    model::activity::{ActivityCommentDto, ActivitySummaryDto, PaginatedActivityCommentsDto},
    server::model::{comment::Comment, pagination::Paginated},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ActivitySummary {
    pub user_id: i32,
    pub handle: String,
    pub post_count: u64,
    pub comment_count: u64,
    pub liked_post_count: u64,
    pub bookmarked_post_count: u64,
}

impl ActivitySummary {
    pub fn into_dto(self) -> ActivitySummaryDto {
        ActivitySummaryDto {
            user_id: self.user_id,
            handle: self.handle,
            post_count: self.post_count,
            comment_count: self.comment_count,
            liked_post_count: self.liked_post_count,
            bookmarked_post_count: self.bookmarked_post_count,
        }
    }
}

/// A user's comment with the title of the post it was left on.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityComment {
    pub comment: Comment,
    /// `None` when the post has since been deleted.
    pub post_title: Option<String>,
    pub post_slug: Option<String>,
}

impl ActivityComment {
    pub fn into_dto(self) -> ActivityCommentDto {
        ActivityCommentDto {
            id: self.comment.id,
            post_id: self.comment.post_id,
            post_title: self.post_title,
            post_slug: self.post_slug,
            content: self.comment.content,
            created_at: self.comment.created_at,
        }
    }
}

impl Paginated<ActivityComment> {
    pub fn into_dto(self) -> PaginatedActivityCommentsDto {
        PaginatedActivityCommentsDto {
            comments: self.items.into_iter().map(ActivityComment::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
