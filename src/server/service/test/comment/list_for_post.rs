use super::*;

use crate::server::model::user::User;

/// Counts how many comments `viewer` sees on the post, replies included, along with
/// the reported top-level total.
async fn visible_count(
    db: &sea_orm::DatabaseConnection,
    viewer: Option<&User>,
    post_id: i32,
) -> Result<(usize, u64), AppError> {
    let page = CommentService::new(db, DEFAULT_MAX_DEPTH)
        .list_for_post(viewer, post_id, None, 0, 50)
        .await?;

    Ok((page.items.iter().map(|node| node.count()).sum(), page.total))
}

/// Tests inquiry visibility for each kind of viewer.
///
/// Expected: anonymous and strangers see only the public comment and a total of one;
/// the inquiry author, the post author and admins see both
#[tokio::test]
async fn inquiries_are_private() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let post_author = user(db, false).await?;
    let asker = user(db, false).await?;
    let stranger = user(db, false).await?;
    let admin = user(db, true).await?;
    let post = factory::post::create_post(db, post_author.id).await?;

    factory::comment::create_comment(db, post.id, stranger.id).await?;
    factory::comment::CommentFactory::new(db, post.id, asker.id)
        .subtype("inquiry")
        .build()
        .await?;

    assert_eq!(visible_count(db, None, post.id).await?, (1, 1));
    assert_eq!(visible_count(db, Some(&stranger), post.id).await?, (1, 1));
    assert_eq!(visible_count(db, Some(&asker), post.id).await?, (2, 2));
    assert_eq!(visible_count(db, Some(&post_author), post.id).await?, (2, 2));
    assert_eq!(visible_count(db, Some(&admin), post.id).await?, (2, 2));

    Ok(())
}

/// Tests that an inquiry reply is pruned from a public thread.
///
/// Expected: the public root is listed without the hidden reply
#[tokio::test]
async fn hidden_replies_are_pruned() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let post_author = user(db, false).await?;
    let asker = user(db, false).await?;
    let post = factory::post::create_post(db, post_author.id).await?;

    let root = factory::comment::create_comment(db, post.id, post_author.id).await?;
    factory::comment::CommentFactory::new(db, post.id, asker.id)
        .parent(Some(root.id))
        .subtype("inquiry")
        .build()
        .await?;

    let page = CommentService::new(db, DEFAULT_MAX_DEPTH)
        .list_for_post(None, post.id, None, 0, 10)
        .await?;

    assert_eq!(page.items.len(), 1);
    assert!(page.items[0].replies.is_empty());

    Ok(())
}

/// Tests filtering top-level comments by subtype.
///
/// Expected: only reviews are returned
#[tokio::test]
async fn filters_by_subtype() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (author, post) = factory::helpers::create_post_with_author(db).await?;

    factory::comment::create_comment(db, post.id, author.id).await?;
    factory::comment::CommentFactory::new(db, post.id, author.id)
        .subtype("review")
        .build()
        .await?;

    let page = CommentService::new(db, DEFAULT_MAX_DEPTH)
        .list_for_post(None, post.id, Some(CommentSubtype::Review), 0, 10)
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(
        page.items[0].comment.subtype(),
        Some(CommentSubtype::Review)
    );

    Ok(())
}
