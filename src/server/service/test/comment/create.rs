use super::*;

/// Tests adding a top-level comment.
///
/// Expected: Ok and the post's comment_count incremented
#[tokio::test]
async fn increments_comment_count() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let commenter = user(db, false).await?;
    let (_, post) = factory::helpers::create_post_with_author(db).await?;

    let comment = CommentService::new(db, DEFAULT_MAX_DEPTH)
        .create(&commenter, params(post.id, None))
        .await?;

    assert_eq!(comment.author_id, commenter.id);
    assert_eq!(comment.parent_comment_id, None);
    let post = PostRepository::new(db).get_by_id(post.id).await?.unwrap();
    assert_eq!(post.comment_count, 1);

    Ok(())
}

/// Tests replying at and beyond the maximum depth.
///
/// Expected: reply at depth 3 succeeds, reply at depth 4 is Err(BadRequest)
#[tokio::test]
async fn enforces_max_depth() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let commenter = user(db, false).await?;
    let (author, post) = factory::helpers::create_post_with_author(db).await?;
    // depths 0, 1, 2
    let chain = factory::helpers::create_reply_chain(db, post.id, author.id, 2).await?;
    let service = CommentService::new(db, DEFAULT_MAX_DEPTH);

    let deepest = service
        .create(&commenter, params(post.id, Some(chain[2].id)))
        .await?;
    let result = service
        .create(&commenter, params(post.id, Some(deepest.id)))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests replying to a comment that belongs to another post.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn parent_must_share_post() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let commenter = user(db, false).await?;
    let (author, first) = factory::helpers::create_post_with_author(db).await?;
    let second = factory::post::create_post(db, author.id).await?;
    let parent = factory::comment::create_comment(db, first.id, author.id).await?;

    let result = CommentService::new(db, DEFAULT_MAX_DEPTH)
        .create(&commenter, params(second.id, Some(parent.id)))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests commenting on a post that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn missing_post_is_not_found() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let commenter = user(db, false).await?;

    let result = CommentService::new(db, DEFAULT_MAX_DEPTH)
        .create(&commenter, params(999, None))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
