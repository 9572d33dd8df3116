//! Per-user activity: authored posts and comments, liked and bookmarked posts.

use sea_orm::DatabaseConnection;
use std::collections::HashMap;

use crate::server::{
    data::{
        comment::CommentRepository, post::PostRepository, user::UserRepository,
        user_reaction::UserReactionRepository,
    },
    error::AppError,
    model::{
        activity::{ActivityComment, ActivitySummary},
        pagination::Paginated,
        post::{Post, PostFilter},
        reaction::{ReactionFlag, TargetType},
    },
};

pub struct ActivityService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ActivityService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Counts of a user's posts, comments, liked and bookmarked posts.
    pub async fn summary(&self, user_id: i32) -> Result<ActivitySummary, AppError> {
        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let reactions = UserReactionRepository::new(self.db);

        Ok(ActivitySummary {
            user_id: user.id,
            handle: user.handle,
            post_count: PostRepository::new(self.db).count_by_author(user_id).await?,
            comment_count: CommentRepository::new(self.db)
                .count_by_author(user_id)
                .await?,
            liked_post_count: reactions
                .count_by_user_flag(user_id, TargetType::Post, ReactionFlag::Liked)
                .await?,
            bookmarked_post_count: reactions
                .count_by_user_flag(user_id, TargetType::Post, ReactionFlag::Bookmarked)
                .await?,
        })
    }

    pub async fn posts(&self, user_id: i32, page: u64, per_page: u64) -> Result<Paginated<Post>, AppError> {
        let filter = PostFilter {
            author_id: Some(user_id),
            ..Default::default()
        };
        let (posts, total) = PostRepository::new(self.db)
            .get_paginated(&filter, page, per_page)
            .await?;

        Ok(Paginated::new(posts, total, page, per_page))
    }

    /// A user's comments, newest first, each with the title and slug of its post.
    ///
    /// Comments on deleted posts carry no title or slug.
    pub async fn comments(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<ActivityComment>, AppError> {
        let (comments, total) = CommentRepository::new(self.db)
            .get_by_author_paginated(user_id, page, per_page)
            .await?;

        let mut post_ids: Vec<i32> = comments.iter().map(|c| c.post_id).collect();
        post_ids.sort_unstable();
        post_ids.dedup();
        let posts: HashMap<i32, Post> = PostRepository::new(self.db)
            .get_by_ids(&post_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let items = comments
            .into_iter()
            .map(|comment| {
                let post = posts.get(&comment.post_id);
                ActivityComment {
                    post_title: post.map(|p| p.title.clone()),
                    post_slug: post.map(|p| p.slug.clone()),
                    comment,
                }
            })
            .collect();

        Ok(Paginated::new(items, total, page, per_page))
    }

    pub async fn liked_posts(&self, user_id: i32, page: u64, per_page: u64) -> Result<Paginated<Post>, AppError> {
        self.flagged_posts(user_id, ReactionFlag::Liked, page, per_page)
            .await
    }

    pub async fn bookmarked_posts(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Post>, AppError> {
        self.flagged_posts(user_id, ReactionFlag::Bookmarked, page, per_page)
            .await
    }

    /// Posts carrying `flag` for the user, most recently reacted first. Deleted posts are
    /// skipped but still counted in `total`.
    async fn flagged_posts(
        &self,
        user_id: i32,
        flag: ReactionFlag,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Post>, AppError> {
        let (ids, total) = UserReactionRepository::new(self.db)
            .get_target_ids_by_flag(user_id, TargetType::Post, flag, page, per_page)
            .await?;
        let posts = PostRepository::new(self.db).get_by_ids(&ids).await?;

        Ok(Paginated::new(posts, total, page, per_page))
    }
}
