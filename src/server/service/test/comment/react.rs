use super::*;

/// Tests liking a comment.
///
/// Expected: Ok with like_count 1 and no bookmark count
#[tokio::test]
async fn likes_comment() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let reader = user(db, false).await?;
    let (author, post) = factory::helpers::create_post_with_author(db).await?;
    let comment = factory::comment::create_comment(db, post.id, author.id).await?;

    let state = CommentService::new(db, DEFAULT_MAX_DEPTH)
        .react(&reader, comment.id, ReactionKind::Like)
        .await?;

    assert!(state.flags.liked);
    assert_eq!(state.like_count, 1);
    assert_eq!(state.bookmark_count, 0);

    Ok(())
}

/// Tests bookmarking a comment.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_bookmark() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let reader = user(db, false).await?;
    let (author, post) = factory::helpers::create_post_with_author(db).await?;
    let comment = factory::comment::create_comment(db, post.id, author.id).await?;

    let result = CommentService::new(db, DEFAULT_MAX_DEPTH)
        .react(&reader, comment.id, ReactionKind::Bookmark)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
