//! User reaction data repository.
//!
//! Stores one row per (user, target type, target id) holding the user's like, dislike
//! and bookmark flags. Counter columns on posts and comments are maintained separately
//! by the services.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::server::model::reaction::{
    ReactionFlag, ReactionFlags, ReactionTarget, TargetType, UserReaction,
};

/// Repository providing database operations for user reactions.
pub struct UserReactionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserReactionRepository<'a> {
    /// Creates a new UserReactionRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserReactionRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    fn for_target(user_id: i32, target: ReactionTarget) -> Select<entity::user_reaction::Entity> {
        entity::prelude::UserReaction::find()
            .filter(entity::user_reaction::Column::UserId.eq(user_id))
            .filter(entity::user_reaction::Column::TargetType.eq(target.target_type.as_str()))
            .filter(entity::user_reaction::Column::TargetId.eq(target.target_id))
    }

    /// Finds a user's reaction on a target.
    ///
    /// # Returns
    /// - `Ok(Some(UserReaction))` - The user has reacted to the target before
    /// - `Ok(None)` - No reaction row exists
    /// - `Err(DbErr)` - Database error during query
    pub async fn find(
        &self,
        user_id: i32,
        target: ReactionTarget,
    ) -> Result<Option<UserReaction>, DbErr> {
        let entity = Self::for_target(user_id, target).one(self.db).await?;

        Ok(entity.map(UserReaction::from_entity))
    }

    /// Inserts or replaces the flags of a user's reaction on a target.
    ///
    /// The (user, target type, target id) unique index in the migration backs the
    /// one-row-per-target rule.
    ///
    /// # Arguments
    /// - `user_id` - Reacting user
    /// - `target` - Post or comment reacted to
    /// - `flags` - Complete new flag state
    ///
    /// # Returns
    /// - `Ok(UserReaction)` - The stored reaction
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn upsert(
        &self,
        user_id: i32,
        target: ReactionTarget,
        flags: ReactionFlags,
    ) -> Result<UserReaction, DbErr> {
        let now = Utc::now();

        let entity = match Self::for_target(user_id, target).one(self.db).await? {
            Some(existing) => {
                let mut active_model = existing.into_active_model();
                active_model.liked = ActiveValue::Set(flags.liked);
                active_model.disliked = ActiveValue::Set(flags.disliked);
                active_model.bookmarked = ActiveValue::Set(flags.bookmarked);
                active_model.updated_at = ActiveValue::Set(now);
                active_model.update(self.db).await?
            }
            None => {
                entity::user_reaction::ActiveModel {
                    user_id: ActiveValue::Set(user_id),
                    target_type: ActiveValue::Set(target.target_type.as_str().to_string()),
                    target_id: ActiveValue::Set(target.target_id),
                    liked: ActiveValue::Set(flags.liked),
                    disliked: ActiveValue::Set(flags.disliked),
                    bookmarked: ActiveValue::Set(flags.bookmarked),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        Ok(UserReaction::from_entity(entity))
    }

    /// Gets IDs of targets on which a user has `flag` set, most recently updated first.
    ///
    /// # Returns
    /// - `Ok((ids, total))` - Page of target IDs and the total count
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_target_ids_by_flag(
        &self,
        user_id: i32,
        target_type: TargetType,
        flag: ReactionFlag,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<i32>, u64), DbErr> {
        let paginator = entity::prelude::UserReaction::find()
            .filter(entity::user_reaction::Column::UserId.eq(user_id))
            .filter(entity::user_reaction::Column::TargetType.eq(target_type.as_str()))
            .filter(flag.column().eq(true))
            .order_by_desc(entity::user_reaction::Column::UpdatedAt)
            .order_by_desc(entity::user_reaction::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let ids = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(|reaction| reaction.target_id)
            .collect();

        Ok((ids, total))
    }

    /// Counts targets on which a user has `flag` set.
    pub async fn count_by_user_flag(
        &self,
        user_id: i32,
        target_type: TargetType,
        flag: ReactionFlag,
    ) -> Result<u64, DbErr> {
        entity::prelude::UserReaction::find()
            .filter(entity::user_reaction::Column::UserId.eq(user_id))
            .filter(entity::user_reaction::Column::TargetType.eq(target_type.as_str()))
            .filter(flag.column().eq(true))
            .count(self.db)
            .await
    }
}
