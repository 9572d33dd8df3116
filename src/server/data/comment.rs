//! Comment data repository for database operations.
//!
//! Provides the `CommentRepository` for comment CRUD, reply threading and counters.
//! Reads only return active comments; reply trees are fetched one level per query
//! and assembled in memory.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, IdenStatic, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Select,
};
use std::collections::HashMap;

use crate::server::model::{
    comment::{
        Comment, CommentCounter, CommentNode, CommentSubtype, CreateCommentParams, InquiryScope,
    },
    post::ContentStatus,
};

/// Upper bound on parent pointer hops when computing depth.
const MAX_PARENT_WALK: u32 = 64;

/// Repository providing database operations for comments.
pub struct CommentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommentRepository<'a> {
    /// Creates a new CommentRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `CommentRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    fn active() -> Select<entity::comment::Entity> {
        entity::prelude::Comment::find()
            .filter(entity::comment::Column::Status.eq(ContentStatus::Active.as_str()))
    }

    /// Inserts a comment. Parent and depth validation happen in the service layer.
    ///
    /// # Returns
    /// - `Ok(Comment)` - The created comment
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, params: CreateCommentParams) -> Result<Comment, DbErr> {
        let now = Utc::now();
        let metadata = params.metadata();

        let entity = entity::comment::ActiveModel {
            content: ActiveValue::Set(params.content),
            post_id: ActiveValue::Set(params.post_id),
            parent_comment_id: ActiveValue::Set(params.parent_comment_id),
            author_id: ActiveValue::Set(params.author_id),
            like_count: ActiveValue::Set(0),
            dislike_count: ActiveValue::Set(0),
            status: ActiveValue::Set(ContentStatus::Active.as_str().to_string()),
            metadata: ActiveValue::Set(metadata),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Comment::from_entity(entity))
    }

    /// Gets an active comment by ID.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Comment>, DbErr> {
        let entity = Self::active()
            .filter(entity::comment::Column::Id.eq(id))
            .one(self.db)
            .await?;

        Ok(entity.map(Comment::from_entity))
    }

    /// Gets top-level comments of a post, oldest first.
    ///
    /// # Arguments
    /// - `post_id` - Post whose comments to list
    /// - `subtype` - When set, only comments whose metadata subtype matches
    /// - `inquiries` - Which inquiries count towards the page and the total
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of comments per page
    ///
    /// # Returns
    /// - `Ok((comments, total))` - Page of top-level comments and the total count
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_top_level_by_post(
        &self,
        post_id: i32,
        subtype: Option<CommentSubtype>,
        inquiries: InquiryScope,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Comment>, u64), DbErr> {
        let mut query = Self::active()
            .filter(entity::comment::Column::PostId.eq(post_id))
            .filter(entity::comment::Column::ParentCommentId.is_null());

        if let Some(subtype) = subtype {
            query = query.filter(Expr::cust_with_values(
                "json_extract(\"metadata\", '$.subtype') = ?",
                [subtype.as_str()],
            ));
        }

        match inquiries {
            InquiryScope::All => {}
            InquiryScope::AuthoredBy(Some(user_id)) => {
                query = query.filter(Expr::cust_with_values(
                    "(json_extract(\"metadata\", '$.subtype') IS NOT ? OR \"author_id\" = ?)",
                    [
                        sea_orm::Value::from(CommentSubtype::Inquiry.as_str()),
                        sea_orm::Value::from(user_id),
                    ],
                ));
            }
            InquiryScope::AuthoredBy(None) => {
                query = query.filter(Expr::cust_with_values(
                    "json_extract(\"metadata\", '$.subtype') IS NOT ?",
                    [CommentSubtype::Inquiry.as_str()],
                ));
            }
        }

        let paginator = query
            .order_by_asc(entity::comment::Column::CreatedAt)
            .order_by_asc(entity::comment::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let comments = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Comment::from_entity)
            .collect();

        Ok((comments, total))
    }

    /// Gets the direct active replies of a comment, oldest first.
    pub async fn get_replies(&self, comment_id: i32) -> Result<Vec<Comment>, DbErr> {
        let entities = Self::active()
            .filter(entity::comment::Column::ParentCommentId.eq(comment_id))
            .order_by_asc(entity::comment::Column::CreatedAt)
            .order_by_asc(entity::comment::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Comment::from_entity).collect())
    }

    /// Gets nested active replies below a comment, down to `max_depth` levels.
    ///
    /// Runs one query per level. Replies of deleted comments are not reachable.
    ///
    /// # Arguments
    /// - `comment_id` - Root comment whose replies to fetch
    /// - `max_depth` - Number of reply levels to include; 0 returns no replies
    ///
    /// # Returns
    /// - `Ok(Vec<CommentNode>)` - Direct replies of the root, each with nested replies
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_reply_tree(
        &self,
        comment_id: i32,
        max_depth: u32,
    ) -> Result<Vec<CommentNode>, DbErr> {
        let mut children: HashMap<i32, Vec<Comment>> = HashMap::new();
        let mut frontier = vec![comment_id];

        for _ in 0..max_depth {
            if frontier.is_empty() {
                break;
            }

            let level = Self::active()
                .filter(entity::comment::Column::ParentCommentId.is_in(frontier.clone()))
                .order_by_asc(entity::comment::Column::CreatedAt)
                .order_by_asc(entity::comment::Column::Id)
                .all(self.db)
                .await?;

            frontier = level.iter().map(|c| c.id).collect();
            for entity in level {
                if let Some(parent_id) = entity.parent_comment_id {
                    children
                        .entry(parent_id)
                        .or_default()
                        .push(Comment::from_entity(entity));
                }
            }
        }

        Ok(assemble(comment_id, &mut children))
    }

    /// Computes how many ancestors a comment has.
    ///
    /// Top-level comments have depth 0. Follows parent pointers regardless of status and
    /// stops after 64 hops.
    ///
    /// # Returns
    /// - `Ok(Some(depth))` - Depth of the comment
    /// - `Ok(None)` - No comment with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_depth(&self, comment_id: i32) -> Result<Option<u32>, DbErr> {
        let Some(mut current) = entity::prelude::Comment::find_by_id(comment_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut depth = 0;
        while let Some(parent_id) = current.parent_comment_id {
            if depth >= MAX_PARENT_WALK {
                tracing::warn!(comment_id, "Parent chain exceeded {} hops", MAX_PARENT_WALK);
                break;
            }

            match entity::prelude::Comment::find_by_id(parent_id)
                .one(self.db)
                .await?
            {
                Some(parent) => {
                    depth += 1;
                    current = parent;
                }
                None => break,
            }
        }

        Ok(Some(depth))
    }

    /// Replaces the content of an active comment.
    ///
    /// # Returns
    /// - `Ok(Some(Comment))` - Updated comment
    /// - `Ok(None)` - No active comment with that ID
    /// - `Err(DbErr)` - Database error during query or update
    pub async fn update_content(&self, id: i32, content: String) -> Result<Option<Comment>, DbErr> {
        let Some(existing) = Self::active()
            .filter(entity::comment::Column::Id.eq(id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model = existing.into_active_model();
        active_model.content = ActiveValue::Set(content);
        active_model.updated_at = ActiveValue::Set(Utc::now());
        let entity = active_model.update(self.db).await?;

        Ok(Some(Comment::from_entity(entity)))
    }

    /// Marks an active comment as deleted. Replies are left untouched.
    ///
    /// # Returns
    /// - `Ok(true)` - Comment was active and is now deleted
    /// - `Ok(false)` - No active comment with that ID
    /// - `Err(DbErr)` - Database error during update
    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Comment::update_many()
            .filter(entity::comment::Column::Id.eq(id))
            .filter(entity::comment::Column::Status.eq(ContentStatus::Active.as_str()))
            .col_expr(
                entity::comment::Column::Status,
                Expr::value(ContentStatus::Deleted.as_str()),
            )
            .col_expr(entity::comment::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Counts active comments on a post, replies included.
    pub async fn count_by_post(&self, post_id: i32) -> Result<u64, DbErr> {
        Self::active()
            .filter(entity::comment::Column::PostId.eq(post_id))
            .count(self.db)
            .await
    }

    /// Counts active comments written by a user.
    pub async fn count_by_author(&self, author_id: i32) -> Result<u64, DbErr> {
        Self::active()
            .filter(entity::comment::Column::AuthorId.eq(author_id))
            .count(self.db)
            .await
    }

    /// Gets a user's active comments, newest first.
    pub async fn get_by_author_paginated(
        &self,
        author_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Comment>, u64), DbErr> {
        let paginator = Self::active()
            .filter(entity::comment::Column::AuthorId.eq(author_id))
            .order_by_desc(entity::comment::Column::CreatedAt)
            .order_by_desc(entity::comment::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let comments = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Comment::from_entity)
            .collect();

        Ok((comments, total))
    }

    /// Adds `delta` to a counter column in a single statement, clamping at zero.
    pub async fn increment_counter(
        &self,
        id: i32,
        counter: CommentCounter,
        delta: i64,
    ) -> Result<bool, DbErr> {
        if delta == 0 {
            return Ok(true);
        }

        let column = counter.column();
        let result = entity::prelude::Comment::update_many()
            .filter(entity::comment::Column::Id.eq(id))
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
}

/// Builds the reply forest below `parent_id` from a parent → children index.
fn assemble(parent_id: i32, children: &mut HashMap<i32, Vec<Comment>>) -> Vec<CommentNode> {
    let Some(direct) = children.remove(&parent_id) else {
        return Vec::new();
    };

    direct
        .into_iter()
        .map(|comment| {
            let replies = assemble(comment.id, children);
            CommentNode { comment, replies }
        })
        .collect()
}
