use super::*;

/// Tests the post author removing a comment left by someone else.
///
/// Expected: Ok and the post's comment_count decremented
#[tokio::test]
async fn post_author_can_delete() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let post_author = user(db, false).await?;
    let commenter = user(db, false).await?;
    let post = factory::post::create_post(db, post_author.id).await?;
    let service = CommentService::new(db, DEFAULT_MAX_DEPTH);
    let comment = service
        .create(&commenter, params(post.id, None))
        .await?;

    service.delete(&post_author, comment.id).await?;

    let post = PostRepository::new(db).get_by_id(post.id).await?.unwrap();
    assert_eq!(post.comment_count, 0);

    Ok(())
}

/// Tests an unrelated member deleting a comment.
///
/// Expected: Err(AccessDenied)
#[tokio::test]
async fn stranger_cannot_delete() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let stranger = user(db, false).await?;
    let (author, post) = factory::helpers::create_post_with_author(db).await?;
    let comment = factory::comment::create_comment(db, post.id, author.id).await?;

    let result = CommentService::new(db, DEFAULT_MAX_DEPTH)
        .delete(&stranger, comment.id)
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests editing a comment as someone other than its author.
///
/// Expected: Err(AccessDenied) even for an admin
#[tokio::test]
async fn only_author_edits() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = user(db, true).await?;
    let (author, post) = factory::helpers::create_post_with_author(db).await?;
    let comment = factory::comment::create_comment(db, post.id, author.id).await?;

    let result = CommentService::new(db, DEFAULT_MAX_DEPTH)
        .update(&admin, comment.id, "edited".to_string())
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}
