//! Post data repository for database operations.
//!
//! Provides the `PostRepository` for creating, querying, updating and soft deleting
//! posts, plus atomic counter adjustments. Every read filters on `status = 'active'`
//! so soft-deleted posts never leave this layer.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, IdenStatic, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Select,
    TransactionTrait,
};

use crate::server::{
    model::post::{
        ContentStatus, CreatePostParams, Post, PostCounter, PostFilter, UpdatePostParams,
    },
    util::slug::{post_slug, slugify},
};

/// Repository providing database operations for posts.
pub struct PostRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PostRepository<'a> {
    /// Creates a new PostRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `PostRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    fn active() -> Select<entity::post::Entity> {
        entity::prelude::Post::find()
            .filter(entity::post::Column::Status.eq(ContentStatus::Active.as_str()))
    }

    /// Creates a new post with all counters at zero.
    ///
    /// The row is inserted with a temporary slug and then updated to `slugify(title)-{id}`
    /// inside the same transaction, so the final slug is unique because the id is.
    ///
    /// # Arguments
    /// - `params` - Author, title, content, classification and metadata
    ///
    /// # Returns
    /// - `Ok(Post)` - The created post with its final slug
    /// - `Err(DbErr)` - Database error during insert or slug update
    pub async fn create(&self, params: CreatePostParams) -> Result<Post, DbErr> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let pending_slug = format!(
            "{}-pending-{:016x}",
            slugify(&params.title),
            rand::random::<u64>()
        );
        let inserted = entity::post::ActiveModel {
            title: ActiveValue::Set(params.title.clone()),
            content: ActiveValue::Set(params.content),
            slug: ActiveValue::Set(pending_slug),
            author_id: ActiveValue::Set(params.author_id),
            service_type: ActiveValue::Set(params.service_type),
            category: ActiveValue::Set(params.category),
            metadata: ActiveValue::Set(params.metadata),
            view_count: ActiveValue::Set(0),
            like_count: ActiveValue::Set(0),
            dislike_count: ActiveValue::Set(0),
            comment_count: ActiveValue::Set(0),
            bookmark_count: ActiveValue::Set(0),
            status: ActiveValue::Set(ContentStatus::Active.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let id = inserted.id;
        let mut active_model = inserted.into_active_model();
        active_model.slug = ActiveValue::Set(post_slug(&params.title, id));
        let entity = active_model.update(&txn).await?;

        txn.commit().await?;

        Ok(Post::from_entity(entity))
    }

    /// Gets an active post by ID.
    ///
    /// # Returns
    /// - `Ok(Some(Post))` - Post found and not deleted
    /// - `Ok(None)` - No post with that ID, or the post is soft deleted
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Post>, DbErr> {
        let entity = Self::active()
            .filter(entity::post::Column::Id.eq(id))
            .one(self.db)
            .await?;

        Ok(entity.map(Post::from_entity))
    }

    /// Gets an active post by slug.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, DbErr> {
        let entity = Self::active()
            .filter(entity::post::Column::Slug.eq(slug))
            .one(self.db)
            .await?;

        Ok(entity.map(Post::from_entity))
    }

    /// Gets active posts matching `filter`, newest first.
    ///
    /// # Arguments
    /// - `filter` - Optional service type, category, author and text search filters
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of posts per page
    ///
    /// # Returns
    /// - `Ok((posts, total))` - Page of posts and the number of matching posts
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_paginated(
        &self,
        filter: &PostFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Post>, u64), DbErr> {
        let mut query = Self::active();

        if let Some(service_type) = &filter.service_type {
            query = query.filter(entity::post::Column::ServiceType.eq(service_type.as_str()));
        }
        if let Some(category) = &filter.category {
            query = query.filter(entity::post::Column::Category.eq(category.as_str()));
        }
        if let Some(author_id) = filter.author_id {
            query = query.filter(entity::post::Column::AuthorId.eq(author_id));
        }
        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(entity::post::Column::Title.contains(search))
                    .add(entity::post::Column::Content.contains(search)),
            );
        }

        let paginator = query
            .order_by_desc(entity::post::Column::CreatedAt)
            .order_by_desc(entity::post::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let posts = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Post::from_entity)
            .collect();

        Ok((posts, total))
    }

    /// Gets active posts by ID, in the order of `ids`.
    ///
    /// Missing or deleted posts are skipped.
    pub async fn get_by_ids(&self, ids: &[i32]) -> Result<Vec<Post>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut entities = Self::active()
            .filter(entity::post::Column::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await?;

        let mut posts = Vec::with_capacity(entities.len());
        for id in ids {
            if let Some(index) = entities.iter().position(|e| e.id == *id) {
                posts.push(Post::from_entity(entities.swap_remove(index)));
            }
        }

        Ok(posts)
    }

    /// Applies a partial update to an active post.
    ///
    /// A changed title regenerates the slug with the same id suffix.
    ///
    /// # Returns
    /// - `Ok(Some(Post))` - Updated post
    /// - `Ok(None)` - No active post with that ID
    /// - `Err(DbErr)` - Database error during query or update
    pub async fn update(&self, params: UpdatePostParams) -> Result<Option<Post>, DbErr> {
        let Some(existing) = Self::active()
            .filter(entity::post::Column::Id.eq(params.id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let title_changed = params
            .title
            .as_ref()
            .is_some_and(|title| *title != existing.title);

        let mut active_model = existing.into_active_model();
        if let Some(title) = params.title {
            if title_changed {
                active_model.slug = ActiveValue::Set(post_slug(&title, params.id));
            }
            active_model.title = ActiveValue::Set(title);
        }
        if let Some(content) = params.content {
            active_model.content = ActiveValue::Set(content);
        }
        if let Some(service_type) = params.service_type {
            active_model.service_type = ActiveValue::Set(service_type);
        }
        if let Some(category) = params.category {
            active_model.category = ActiveValue::Set(category);
        }
        if let Some(metadata) = params.metadata {
            active_model.metadata = ActiveValue::Set(metadata);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;

        Ok(Some(Post::from_entity(entity)))
    }

    /// Marks an active post as deleted.
    ///
    /// # Returns
    /// - `Ok(true)` - Post was active and is now deleted
    /// - `Ok(false)` - No active post with that ID
    /// - `Err(DbErr)` - Database error during update
    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Post::update_many()
            .filter(entity::post::Column::Id.eq(id))
            .filter(entity::post::Column::Status.eq(ContentStatus::Active.as_str()))
            .col_expr(
                entity::post::Column::Status,
                Expr::value(ContentStatus::Deleted.as_str()),
            )
            .col_expr(entity::post::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Adds `delta` to a counter column in a single statement, clamping at zero.
    ///
    /// # Returns
    /// - `Ok(true)` - Counter updated
    /// - `Ok(false)` - No post with that ID
    /// - `Err(DbErr)` - Database error during update
    pub async fn increment_counter(
        &self,
        id: i32,
        counter: PostCounter,
        delta: i64,
    ) -> Result<bool, DbErr> {
        if delta == 0 {
            return Ok(true);
        }

        let column = counter.column();
        let result = entity::prelude::Post::update_many()
            .filter(entity::post::Column::Id.eq(id))
            .col_expr(
                column,
                Expr::cust_with_values(
                    format!("MAX(0, \"{}\" + ?)", column.as_str()),
                    [delta],
                ),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Counts active posts written by a user.
    pub async fn count_by_author(&self, author_id: i32) -> Result<u64, DbErr> {
        Self::active()
            .filter(entity::post::Column::AuthorId.eq(author_id))
            .count(self.db)
            .await
    }
}
