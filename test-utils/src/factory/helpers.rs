//! Shared helper utilities for factory methods.
//!
//! Common utilities used across all factory modules, including ID generation and
//! convenience methods for creating entities with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// Provides monotonically increasing values for generating unique emails, handles
/// and titles across all factories.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a user and a post authored by that user.
///
/// # Returns
/// - `Ok((author, post))` - Both created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_post_with_author(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::post::Model), DbErr> {
    let author = crate::factory::user::create_user(db).await?;
    let post = crate::factory::post::create_post(db, author.id).await?;

    Ok((author, post))
}

/// Creates a chain of nested replies under a fresh top-level comment.
///
/// The returned vector starts with the top-level comment and each following comment
/// replies to the previous one, so the comment at index `n` sits at depth `n`.
///
/// # Arguments
/// - `db` - Database connection
/// - `post_id` - Post the comments belong to
/// - `author_id` - Author of every comment in the chain
/// - `depth` - Number of replies to create below the top-level comment
pub async fn create_reply_chain(
    db: &DatabaseConnection,
    post_id: i32,
    author_id: i32,
    depth: usize,
) -> Result<Vec<entity::comment::Model>, DbErr> {
    let mut chain = Vec::with_capacity(depth + 1);
    let root = crate::factory::comment::create_comment(db, post_id, author_id).await?;
    chain.push(root);

    for _ in 0..depth {
        let parent_id = chain.last().map(|c| c.id);
        let reply = crate::factory::comment::CommentFactory::new(db, post_id, author_id)
            .parent(parent_id)
            .build()
            .await?;
        chain.push(reply);
    }

    Ok(chain)
}
