//! Comment domain models, threading and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::comment::{CommentDto, CreateCommentDto, PaginatedCommentsDto},
    server::{
        error::AppError,
        model::{pagination::Paginated, post::ContentStatus},
    },
};

/// Metadata key holding the comment subtype.
pub const SUBTYPE_KEY: &str = "subtype";

/// Special-purpose comment kinds stored in the comment metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSubtype {
    /// Private question to the post author; hidden from other viewers.
    Inquiry,
    Review,
}

impl CommentSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inquiry => "inquiry",
            Self::Review => "review",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "inquiry" => Some(Self::Inquiry),
            "review" => Some(Self::Review),
            _ => None,
        }
    }
}

/// Which top-level inquiries a comment listing includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryScope {
    All,
    /// Only inquiries written by this user; `None` hides every inquiry.
    AuthoredBy(Option<i32>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: i32,
    pub content: String,
    pub post_id: i32,
    /// `None` for top-level comments.
    pub parent_comment_id: Option<i32>,
    pub author_id: i32,
    pub like_count: i64,
    pub dislike_count: i64,
    pub status: ContentStatus,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Converts an entity model to a comment domain model at the repository boundary.
    pub fn from_entity(entity: entity::comment::Model) -> Self {
        Self {
            id: entity.id,
            content: entity.content,
            post_id: entity.post_id,
            parent_comment_id: entity.parent_comment_id,
            author_id: entity.author_id,
            like_count: entity.like_count,
            dislike_count: entity.dislike_count,
            status: ContentStatus::from_db(&entity.status),
            metadata: entity.metadata,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Reads the subtype from metadata, ignoring unknown values.
    pub fn subtype(&self) -> Option<CommentSubtype> {
        self.metadata
            .get(SUBTYPE_KEY)
            .and_then(|value| value.as_str())
            .and_then(CommentSubtype::parse)
    }

    /// Converts the comment to a DTO with the given nested replies.
    pub fn into_dto(self, replies: Vec<CommentDto>) -> CommentDto {
        let subtype = self.subtype().map(|s| s.as_str().to_string());
        CommentDto {
            id: self.id,
            post_id: self.post_id,
            parent_comment_id: self.parent_comment_id,
            author_id: self.author_id,
            content: self.content,
            subtype,
            like_count: self.like_count,
            dislike_count: self.dislike_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
            replies,
        }
    }
}

/// A comment together with its nested replies.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentNode {
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    pub fn leaf(comment: Comment) -> Self {
        Self {
            comment,
            replies: Vec::new(),
        }
    }

    pub fn into_dto(self) -> CommentDto {
        let replies = self.replies.into_iter().map(CommentNode::into_dto).collect();
        self.comment.into_dto(replies)
    }

    /// Removes every node, and its subtree, for which `visible` returns false.
    pub fn retain_visible(&mut self, visible: &impl Fn(&Comment) -> bool) {
        self.replies.retain(|node| visible(&node.comment));
        for reply in &mut self.replies {
            reply.retain_visible(visible);
        }
    }

    /// Number of comments in this tree, including the root.
    pub fn count(&self) -> usize {
        1 + self.replies.iter().map(CommentNode::count).sum::<usize>()
    }
}

impl Paginated<CommentNode> {
    pub fn into_dto(self) -> PaginatedCommentsDto {
        PaginatedCommentsDto {
            comments: self.items.into_iter().map(CommentNode::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Parameters for creating a comment or reply.
#[derive(Debug, Clone)]
pub struct CreateCommentParams {
    pub post_id: i32,
    pub author_id: i32,
    pub parent_comment_id: Option<i32>,
    pub content: String,
    pub subtype: Option<CommentSubtype>,
}

impl CreateCommentParams {
    /// Converts the request body, rejecting unknown subtypes.
    ///
    /// # Returns
    /// - `Ok(CreateCommentParams)` - Parameters with `author_id` left for the service
    /// - `Err(AppError::BadRequest)` - Subtype is not `inquiry` or `review`
    pub fn from_dto(post_id: i32, dto: CreateCommentDto) -> Result<Self, AppError> {
        let subtype = dto
            .subtype
            .as_deref()
            .map(|value| {
                CommentSubtype::parse(value)
                    .ok_or_else(|| AppError::BadRequest(format!("Unknown comment subtype '{}'", value)))
            })
            .transpose()?;

        Ok(Self {
            post_id,
            author_id: 0,
            parent_comment_id: dto.parent_comment_id,
            content: dto.content,
            subtype,
        })
    }

    /// Metadata object stored with the comment.
    pub fn metadata(&self) -> serde_json::Value {
        match self.subtype {
            Some(subtype) => serde_json::json!({ SUBTYPE_KEY: subtype.as_str() }),
            None => serde_json::json!({}),
        }
    }
}

/// Counter columns on a comment that can be adjusted atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentCounter {
    Like,
    Dislike,
}

impl CommentCounter {
    pub fn column(&self) -> entity::comment::Column {
        match self {
            Self::Like => entity::comment::Column::LikeCount,
            Self::Dislike => entity::comment::Column::DislikeCount,
        }
    }
}
