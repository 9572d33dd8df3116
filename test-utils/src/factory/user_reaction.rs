//! User reaction factory for creating test reaction entities.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating user reactions with customizable flags.
pub struct UserReactionFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    target_type: String,
    target_id: i32,
    liked: bool,
    disliked: bool,
    bookmarked: bool,
}

impl<'a> UserReactionFactory<'a> {
    /// Creates a new factory for a reaction on a post with every flag unset.
    pub fn new(db: &'a DatabaseConnection, user_id: i32, target_id: i32) -> Self {
        Self {
            db,
            user_id,
            target_type: "post".to_string(),
            target_id,
            liked: false,
            disliked: false,
            bookmarked: false,
        }
    }

    /// Sets the target type (`"post"` or `"comment"`).
    pub fn target_type(mut self, target_type: impl Into<String>) -> Self {
        self.target_type = target_type.into();
        self
    }

    pub fn liked(mut self, liked: bool) -> Self {
        self.liked = liked;
        self
    }

    pub fn disliked(mut self, disliked: bool) -> Self {
        self.disliked = disliked;
        self
    }

    pub fn bookmarked(mut self, bookmarked: bool) -> Self {
        self.bookmarked = bookmarked;
        self
    }

    pub async fn build(self) -> Result<entity::user_reaction::Model, DbErr> {
        let now = Utc::now();
        entity::user_reaction::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            target_type: ActiveValue::Set(self.target_type),
            target_id: ActiveValue::Set(self.target_id),
            liked: ActiveValue::Set(self.liked),
            disliked: ActiveValue::Set(self.disliked),
            bookmarked: ActiveValue::Set(self.bookmarked),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a "liked" reaction from `user_id` on the post `post_id`.
pub async fn create_user_reaction(
    db: &DatabaseConnection,
    user_id: i32,
    post_id: i32,
) -> Result<entity::user_reaction::Model, DbErr> {
    UserReactionFactory::new(db, user_id, post_id)
        .liked(true)
        .build()
        .await
}
