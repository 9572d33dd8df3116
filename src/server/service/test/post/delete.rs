use super::*;

/// Tests the author deleting a post.
///
/// Expected: Ok, then the post is no longer found
#[tokio::test]
async fn author_deletes_post() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = user(db, false).await?;
    let service = PostService::new(db);
    let post = service.create(&author, params("Short lived")).await?;

    service.delete(&author, post.id).await?;

    assert!(matches!(
        service.get_by_id(post.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests a member deleting someone else's post.
///
/// Expected: Err(AccessDenied) and the post still exists
#[tokio::test]
async fn stranger_cannot_delete() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = user(db, false).await?;
    let stranger = user(db, false).await?;
    let service = PostService::new(db);
    let post = service.create(&author, params("Keep me")).await?;

    assert!(matches!(
        service.delete(&stranger, post.id).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));
    assert!(service.get_by_id(post.id).await.is_ok());

    Ok(())
}
