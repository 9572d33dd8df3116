use super::*;

/// Tests the counts in a user's activity summary.
///
/// Expected: one post, two comments, one like and one bookmark
#[tokio::test]
async fn counts_user_activity() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let member = user(db, false).await?;
    let (_, other_post) = factory::helpers::create_post_with_author(db).await?;

    factory::post::create_post(db, member.id).await?;
    factory::comment::create_comment(db, other_post.id, member.id).await?;
    factory::comment::create_comment(db, other_post.id, member.id).await?;
    factory::user_reaction::UserReactionFactory::new(db, member.id, other_post.id)
        .liked(true)
        .bookmarked(true)
        .build()
        .await?;

    let summary = ActivityService::new(db).summary(member.id).await?;

    assert_eq!(summary.handle, member.handle);
    assert_eq!(summary.post_count, 1);
    assert_eq!(summary.comment_count, 2);
    assert_eq!(summary.liked_post_count, 1);
    assert_eq!(summary.bookmarked_post_count, 1);

    Ok(())
}

/// Tests the summary of a user that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn unknown_user_is_not_found() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ActivityService::new(db).summary(42).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
