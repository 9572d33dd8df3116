//! Comment factory for creating test comment entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test comments with customizable fields.
pub struct CommentFactory<'a> {
    db: &'a DatabaseConnection,
    post_id: i32,
    author_id: i32,
    parent_comment_id: Option<i32>,
    content: String,
    status: String,
    metadata: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl<'a> CommentFactory<'a> {
    /// Creates a new CommentFactory with default values.
    ///
    /// Defaults:
    /// - content: `"Comment {id}"`
    /// - parent_comment_id: `None` (top-level)
    /// - status: `"active"`, metadata: `{}`, created_at: now
    pub fn new(db: &'a DatabaseConnection, post_id: i32, author_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            post_id,
            author_id,
            parent_comment_id: None,
            content: format!("Comment {}", id),
            status: "active".to_string(),
            metadata: serde_json::json!({}),
            created_at: Utc::now(),
        }
    }

    pub fn parent(mut self, parent_comment_id: Option<i32>) -> Self {
        self.parent_comment_id = parent_comment_id;
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets the comment status (`"active"` or `"deleted"`).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the `subtype` metadata key (`"inquiry"` or `"review"`).
    pub fn subtype(mut self, subtype: impl Into<String>) -> Self {
        self.metadata = serde_json::json!({ "subtype": subtype.into() });
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the comment entity into the database.
    pub async fn build(self) -> Result<entity::comment::Model, DbErr> {
        entity::comment::ActiveModel {
            content: ActiveValue::Set(self.content),
            post_id: ActiveValue::Set(self.post_id),
            parent_comment_id: ActiveValue::Set(self.parent_comment_id),
            author_id: ActiveValue::Set(self.author_id),
            like_count: ActiveValue::Set(0),
            dislike_count: ActiveValue::Set(0),
            status: ActiveValue::Set(self.status),
            metadata: ActiveValue::Set(self.metadata),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a top-level comment with default values.
pub async fn create_comment(
    db: &DatabaseConnection,
    post_id: i32,
    author_id: i32,
) -> Result<entity::comment::Model, DbErr> {
    CommentFactory::new(db, post_id, author_id).build().await
}
