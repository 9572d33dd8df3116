//! Post factory for creating test post entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test posts with customizable fields.
///
/// The slug defaults to `"post-{n}"` with a unique counter value; it does not embed the
/// row id the way the repository does, which is fine for tests that do not assert on it.
pub struct PostFactory<'a> {
    db: &'a DatabaseConnection,
    author_id: i32,
    title: String,
    content: String,
    slug: String,
    service_type: String,
    category: String,
    metadata: serde_json::Value,
    like_count: i64,
    bookmark_count: i64,
    comment_count: i64,
    status: String,
    created_at: DateTime<Utc>,
}

impl<'a> PostFactory<'a> {
    /// Creates a new PostFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Post {id}"`
    /// - content: `"Test post content"`
    /// - service_type: `"community"`, category: `"general"`
    /// - metadata: `{}`
    /// - counters: 0, status: `"active"`, created_at: now
    pub fn new(db: &'a DatabaseConnection, author_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            author_id,
            title: format!("Post {}", id),
            content: "Test post content".to_string(),
            slug: format!("post-{}", id),
            service_type: "community".to_string(),
            category: "general".to_string(),
            metadata: serde_json::json!({}),
            like_count: 0,
            bookmark_count: 0,
            comment_count: 0,
            status: "active".to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn like_count(mut self, like_count: i64) -> Self {
        self.like_count = like_count;
        self
    }

    pub fn bookmark_count(mut self, bookmark_count: i64) -> Self {
        self.bookmark_count = bookmark_count;
        self
    }

    pub fn comment_count(mut self, comment_count: i64) -> Self {
        self.comment_count = comment_count;
        self
    }

    /// Sets the post status (`"active"` or `"deleted"`).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the post entity into the database.
    pub async fn build(self) -> Result<entity::post::Model, DbErr> {
        entity::post::ActiveModel {
            title: ActiveValue::Set(self.title),
            content: ActiveValue::Set(self.content),
            slug: ActiveValue::Set(self.slug),
            author_id: ActiveValue::Set(self.author_id),
            service_type: ActiveValue::Set(self.service_type),
            category: ActiveValue::Set(self.category),
            metadata: ActiveValue::Set(self.metadata),
            view_count: ActiveValue::Set(0),
            like_count: ActiveValue::Set(self.like_count),
            dislike_count: ActiveValue::Set(0),
            comment_count: ActiveValue::Set(self.comment_count),
            bookmark_count: ActiveValue::Set(self.bookmark_count),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a post with default values for the given author.
pub async fn create_post(
    db: &DatabaseConnection,
    author_id: i32,
) -> Result<entity::post::Model, DbErr> {
    PostFactory::new(db, author_id).build().await
}
