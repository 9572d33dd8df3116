use super::*;

/// Tests the author editing their post.
///
/// Expected: Ok with only the provided fields changed
#[tokio::test]
async fn author_updates_fields() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = user(db, false).await?;
    let service = PostService::new(db);
    let post = service.create(&author, params("Old title")).await?;

    let updated = service
        .update(
            &author,
            UpdatePostParams {
                id: post.id,
                title: Some("New title".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.title, "New title");
    assert_eq!(updated.content, post.content);

    Ok(())
}

/// Tests another member editing a post, then an admin doing the same.
///
/// Expected: Err(AccessDenied) for the member, Ok for the admin
#[tokio::test]
async fn only_author_or_admin() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = user(db, false).await?;
    let stranger = user(db, false).await?;
    let admin = user(db, true).await?;
    let service = PostService::new(db);
    let post = service.create(&author, params("Mine")).await?;

    let edit = |content: &str| UpdatePostParams {
        id: post.id,
        content: Some(content.to_string()),
        ..Default::default()
    };

    assert!(matches!(
        service.update(&stranger, edit("hijacked")).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));
    let moderated = service.update(&admin, edit("moderated")).await?;
    assert_eq!(moderated.content, "moderated");

    Ok(())
}
