//! Post business logic: validation, ownership checks, views and reactions.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{post::PostRepository, user::UserRepository, user_reaction::UserReactionRepository},
    error::{auth::AuthError, AppError},
    model::{
        pagination::Paginated,
        post::{CreatePostParams, Post, PostCounter, PostFilter, PostWithAuthor, UpdatePostParams},
        reaction::{ReactionKind, ReactionState, ReactionTarget},
        user::User,
    },
};

pub const MAX_TITLE_CHARS: usize = 200;

pub struct PostService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PostService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a post authored by `author`.
    ///
    /// # Returns
    /// - `Ok(Post)` - Created post with its slug
    /// - `Err(AppError::BadRequest)` - Title, content, type, category or metadata invalid
    pub async fn create(&self, author: &User, mut params: CreatePostParams) -> Result<Post, AppError> {
        params.author_id = author.id;
        params.title = validate_title(&params.title)?;
        validate_content(&params.content)?;
        params.service_type = validate_label("service_type", &params.service_type)?;
        params.category = validate_label("category", &params.category)?;
        params.metadata = validate_metadata(params.metadata)?;

        let post = PostRepository::new(self.db).create(params).await?;
        tracing::info!(post_id = post.id, author_id = author.id, slug = %post.slug, "Post created");

        Ok(post)
    }

    /// Gets an active post and counts the view.
    pub async fn get_by_id(&self, id: i32) -> Result<PostWithAuthor, AppError> {
        let post = PostRepository::new(self.db).get_by_id(id).await?;
        self.view(post).await
    }

    /// Gets an active post by slug and counts the view.
    pub async fn get_by_slug(&self, slug: &str) -> Result<PostWithAuthor, AppError> {
        let post = PostRepository::new(self.db).get_by_slug(slug).await?;
        self.view(post).await
    }

    async fn view(&self, post: Option<Post>) -> Result<PostWithAuthor, AppError> {
        let mut post = post.ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        PostRepository::new(self.db)
            .increment_counter(post.id, PostCounter::View, 1)
            .await?;
        post.view_count += 1;

        let author_handle = UserRepository::new(self.db)
            .find_by_id(post.author_id)
            .await?
            .map(|u| u.handle);

        Ok(PostWithAuthor {
            post,
            author_handle,
        })
    }

    /// Lists active posts, newest first, with author handles.
    pub async fn list(
        &self,
        filter: PostFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<PostWithAuthor>, AppError> {
        let (posts, total) = PostRepository::new(self.db)
            .get_paginated(&filter, page, per_page)
            .await?;

        let mut author_ids: Vec<i32> = posts.iter().map(|p| p.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let handles = UserRepository::new(self.db).get_handles(&author_ids).await?;

        let items = posts
            .into_iter()
            .map(|post| PostWithAuthor {
                author_handle: handles.get(&post.author_id).cloned(),
                post,
            })
            .collect();

        Ok(Paginated::new(items, total, page, per_page))
    }

    /// Updates a post as its author or an admin.
    ///
    /// # Returns
    /// - `Ok(Post)` - Updated post
    /// - `Err(AppError::NotFound)` - Post missing or deleted
    /// - `Err(AppError::AuthErr(AccessDenied))` - Actor is neither author nor admin
    /// - `Err(AppError::BadRequest)` - Invalid field values
    pub async fn update(&self, actor: &User, mut params: UpdatePostParams) -> Result<Post, AppError> {
        let repo = PostRepository::new(self.db);
        let existing = repo
            .get_by_id(params.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
        ensure_author_or_admin(actor, &existing, "edit")?;

        if let Some(title) = &params.title {
            params.title = Some(validate_title(title)?);
        }
        if let Some(content) = &params.content {
            validate_content(content)?;
        }
        if let Some(service_type) = &params.service_type {
            params.service_type = Some(validate_label("service_type", service_type)?);
        }
        if let Some(category) = &params.category {
            params.category = Some(validate_label("category", category)?);
        }
        if let Some(metadata) = params.metadata.take() {
            params.metadata = Some(validate_metadata(metadata)?);
        }

        repo.update(params)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
    }

    /// Soft deletes a post as its author or an admin.
    pub async fn delete(&self, actor: &User, id: i32) -> Result<(), AppError> {
        let repo = PostRepository::new(self.db);
        let existing = repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
        ensure_author_or_admin(actor, &existing, "delete")?;

        if !repo.soft_delete(id).await? {
            return Err(AppError::NotFound("Post not found".to_string()));
        }
        tracing::info!(post_id = id, actor_id = actor.id, "Post deleted");

        Ok(())
    }

    /// Toggles a like, dislike or bookmark on a post.
    ///
    /// Like and dislike are mutually exclusive; switching from one to the other moves
    /// both counters.
    ///
    /// # Returns
    /// - `Ok(ReactionState)` - The actor's flags and the post's updated counters
    /// - `Err(AppError::NotFound)` - Post missing or deleted
    pub async fn react(
        &self,
        actor: &User,
        post_id: i32,
        kind: ReactionKind,
    ) -> Result<ReactionState, AppError> {
        let post_repo = PostRepository::new(self.db);
        if post_repo.get_by_id(post_id).await?.is_none() {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        let target = ReactionTarget::post(post_id);
        let reaction_repo = UserReactionRepository::new(self.db);
        let current = reaction_repo
            .find(actor.id, target)
            .await?
            .map(|r| r.flags)
            .unwrap_or_default();

        let (flags, delta) = current.toggle(kind);
        reaction_repo.upsert(actor.id, target, flags).await?;

        post_repo
            .increment_counter(post_id, PostCounter::Like, delta.like)
            .await?;
        post_repo
            .increment_counter(post_id, PostCounter::Dislike, delta.dislike)
            .await?;
        post_repo
            .increment_counter(post_id, PostCounter::Bookmark, delta.bookmark)
            .await?;

        self.get_reaction(actor, post_id).await
    }

    /// The actor's flags on a post together with its counters.
    pub async fn get_reaction(&self, actor: &User, post_id: i32) -> Result<ReactionState, AppError> {
        let post = PostRepository::new(self.db)
            .get_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        let target = ReactionTarget::post(post_id);
        let flags = UserReactionRepository::new(self.db)
            .find(actor.id, target)
            .await?
            .map(|r| r.flags)
            .unwrap_or_default();

        Ok(ReactionState {
            target,
            flags,
            like_count: post.like_count,
            dislike_count: post.dislike_count,
            bookmark_count: post.bookmark_count,
        })
    }
}

fn ensure_author_or_admin(actor: &User, post: &Post, action: &str) -> Result<(), AppError> {
    if actor.admin || actor.id == post.author_id {
        Ok(())
    } else {
        Err(AuthError::AccessDenied(
            actor.id,
            format!("only the author or an admin can {} post {}", action, post.id),
        )
        .into())
    }
}

fn validate_title(title: &str) -> Result<String, AppError> {
    let title = title.trim();
    let len = title.chars().count();
    if len == 0 || len > MAX_TITLE_CHARS {
        return Err(AppError::BadRequest(format!(
            "Title must be between 1 and {} characters",
            MAX_TITLE_CHARS
        )));
    }
    Ok(title.to_string())
}

fn validate_content(content: &str) -> Result<(), AppError> {
    if content.trim().is_empty() {
        return Err(AppError::BadRequest("Content must not be empty".to_string()));
    }
    Ok(())
}

fn validate_label(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{} must not be empty", field)));
    }
    Ok(value.to_string())
}

/// Metadata is a free-form JSON object; `null` becomes an empty object.
fn validate_metadata(metadata: serde_json::Value) -> Result<serde_json::Value, AppError> {
    match metadata {
        serde_json::Value::Null => Ok(serde_json::json!({})),
        serde_json::Value::Object(_) => Ok(metadata),
        _ => Err(AppError::BadRequest(
            "metadata must be a JSON object".to_string(),
        )),
    }
}
