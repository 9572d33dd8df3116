//! Comment business logic: threading limits, inquiry visibility and reactions.
//!
//! Comments form trees through `parent_comment_id`. New replies are rejected once they
//! would sit deeper than the configured maximum. Comments with the `inquiry` subtype
//! are private to their author, the post author and admins.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        comment::CommentRepository, post::PostRepository, user_reaction::UserReactionRepository,
    },
    error::{auth::AuthError, AppError},
    model::{
        comment::{
            Comment, CommentCounter, CommentNode, CommentSubtype, CreateCommentParams,
            InquiryScope,
        },
        pagination::Paginated,
        post::{Post, PostCounter},
        reaction::{ReactionKind, ReactionState, ReactionTarget},
        user::User,
    },
};

pub const DEFAULT_MAX_DEPTH: u32 = 3;

pub struct CommentService<'a> {
    db: &'a DatabaseConnection,
    max_depth: u32,
}

impl<'a> CommentService<'a> {
    pub fn new(db: &'a DatabaseConnection, max_depth: u32) -> Self {
        Self { db, max_depth }
    }

    /// Adds a comment or reply to an active post.
    ///
    /// # Returns
    /// - `Ok(Comment)` - Created comment
    /// - `Err(AppError::NotFound)` - Post or parent comment missing or deleted
    /// - `Err(AppError::BadRequest)` - Empty content, parent on another post, or reply
    ///   deeper than the maximum depth
    pub async fn create(
        &self,
        author: &User,
        mut params: CreateCommentParams,
    ) -> Result<Comment, AppError> {
        params.author_id = author.id;
        let content = params.content.trim();
        if content.is_empty() {
            return Err(AppError::BadRequest("Content must not be empty".to_string()));
        }
        params.content = content.to_string();

        if PostRepository::new(self.db)
            .get_by_id(params.post_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        let repo = CommentRepository::new(self.db);
        if let Some(parent_id) = params.parent_comment_id {
            let parent = repo
                .get_by_id(parent_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Parent comment not found".to_string()))?;
            if parent.post_id != params.post_id {
                return Err(AppError::BadRequest(
                    "Parent comment belongs to a different post".to_string(),
                ));
            }

            let parent_depth = repo
                .get_depth(parent_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Parent comment not found".to_string()))?;
            if parent_depth + 1 > self.max_depth {
                return Err(AppError::BadRequest(format!(
                    "Replies cannot be nested more than {} levels deep",
                    self.max_depth
                )));
            }
        }

        let comment = repo.create(params).await?;
        PostRepository::new(self.db)
            .increment_counter(comment.post_id, PostCounter::Comment, 1)
            .await?;

        Ok(comment)
    }

    /// Lists top-level comments of a post with their reply trees.
    ///
    /// Inquiries the viewer may not see are removed along with their replies.
    ///
    /// # Arguments
    /// - `viewer` - Current user, `None` for anonymous requests
    /// - `post_id` - Post whose comments to list
    /// - `subtype` - Only top-level comments with this subtype
    /// - `page` / `per_page` - Pagination of top-level comments
    pub async fn list_for_post(
        &self,
        viewer: Option<&User>,
        post_id: i32,
        subtype: Option<CommentSubtype>,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<CommentNode>, AppError> {
        let post = PostRepository::new(self.db)
            .get_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        let inquiries = if viewer.is_some_and(|v| v.admin || v.id == post.author_id) {
            InquiryScope::All
        } else {
            InquiryScope::AuthoredBy(viewer.map(|v| v.id))
        };

        let repo = CommentRepository::new(self.db);
        let (top_level, total) = repo
            .get_top_level_by_post(post_id, subtype, inquiries, page, per_page)
            .await?;

        let visible = |comment: &Comment| can_view(viewer, &post, comment);

        let mut nodes = Vec::with_capacity(top_level.len());
        for comment in top_level {
            let replies = repo.get_reply_tree(comment.id, self.max_depth).await?;
            let mut node = CommentNode { comment, replies };
            node.retain_visible(&visible);
            nodes.push(node);
        }

        Ok(Paginated::new(nodes, total, page, per_page))
    }

    /// Edits a comment; only its author may do so.
    pub async fn update(&self, actor: &User, id: i32, content: String) -> Result<Comment, AppError> {
        let repo = CommentRepository::new(self.db);
        let comment = repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        if comment.author_id != actor.id {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("only the author can edit comment {}", id),
            )
            .into());
        }

        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::BadRequest("Content must not be empty".to_string()));
        }

        repo.update_content(id, content.to_string())
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
    }

    /// Soft deletes a comment as its author, the post author, or an admin.
    pub async fn delete(&self, actor: &User, id: i32) -> Result<(), AppError> {
        let repo = CommentRepository::new(self.db);
        let comment = repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        let post_repo = PostRepository::new(self.db);
        let post_author = post_repo.get_by_id(comment.post_id).await?.map(|p| p.author_id);

        let allowed =
            actor.admin || actor.id == comment.author_id || post_author == Some(actor.id);
        if !allowed {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("cannot delete comment {}", id),
            )
            .into());
        }

        if !repo.soft_delete(id).await? {
            return Err(AppError::NotFound("Comment not found".to_string()));
        }
        post_repo
            .increment_counter(comment.post_id, PostCounter::Comment, -1)
            .await?;

        tracing::info!(comment_id = id, actor_id = actor.id, "Comment deleted");

        Ok(())
    }

    /// Toggles a like or dislike on a comment.
    ///
    /// # Returns
    /// - `Ok(ReactionState)` - The actor's flags and the comment's counters
    /// - `Err(AppError::BadRequest)` - Bookmarks are not supported on comments
    /// - `Err(AppError::NotFound)` - Comment missing or deleted
    pub async fn react(
        &self,
        actor: &User,
        comment_id: i32,
        kind: ReactionKind,
    ) -> Result<ReactionState, AppError> {
        if kind == ReactionKind::Bookmark {
            return Err(AppError::BadRequest(
                "Comments can only be liked or disliked".to_string(),
            ));
        }

        let repo = CommentRepository::new(self.db);
        if repo.get_by_id(comment_id).await?.is_none() {
            return Err(AppError::NotFound("Comment not found".to_string()));
        }

        let target = ReactionTarget::comment(comment_id);
        let reaction_repo = UserReactionRepository::new(self.db);
        let current = reaction_repo
            .find(actor.id, target)
            .await?
            .map(|r| r.flags)
            .unwrap_or_default();

        let (flags, delta) = current.toggle(kind);
        reaction_repo.upsert(actor.id, target, flags).await?;

        repo.increment_counter(comment_id, CommentCounter::Like, delta.like)
            .await?;
        repo.increment_counter(comment_id, CommentCounter::Dislike, delta.dislike)
            .await?;

        let comment = repo
            .get_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        Ok(ReactionState {
            target,
            flags,
            like_count: comment.like_count,
            dislike_count: comment.dislike_count,
            bookmark_count: 0,
        })
    }
}

fn can_view(viewer: Option<&User>, post: &Post, comment: &Comment) -> bool {
    if comment.subtype() != Some(CommentSubtype::Inquiry) {
        return true;
    }
    viewer.is_some_and(|v| v.admin || v.id == comment.author_id || v.id == post.author_id)
}
