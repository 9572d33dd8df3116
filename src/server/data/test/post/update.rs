use super::*;

/// Tests updating a post title.
///
/// Verifies that a new title regenerates the slug with the same id suffix.
///
/// Expected: Ok(Some) with new title and slug
#[tokio::test]
async fn regenerates_slug_on_title_change() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_post_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let repo = PostRepository::new(db);
    let post = repo.create(params(author.id, "First title")).await?;

    let updated = repo
        .update(UpdatePostParams {
            id: post.id,
            title: Some("Second title".to_string()),
            ..Default::default()
        })
        .await?
        .unwrap();

    assert_eq!(updated.title, "Second title");
    assert_eq!(updated.slug, format!("second-title-{}", post.id));
    assert_eq!(updated.content, post.content);

    Ok(())
}

/// Tests updating only the content.
///
/// Expected: Ok(Some) with unchanged slug
#[tokio::test]
async fn keeps_slug_when_title_unchanged() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_post_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let repo = PostRepository::new(db);
    let post = repo.create(params(author.id, "Stable")).await?;

    let updated = repo
        .update(UpdatePostParams {
            id: post.id,
            content: Some("New body".to_string()),
            metadata: Some(serde_json::json!({ "price": 10 })),
            ..Default::default()
        })
        .await?
        .unwrap();

    assert_eq!(updated.slug, post.slug);
    assert_eq!(updated.content, "New body");
    assert_eq!(updated.metadata["price"], 10);

    Ok(())
}

/// Tests updating a missing post.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_post() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_post_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PostRepository::new(db);
    let result = repo
        .update(UpdatePostParams {
            id: 42,
            title: Some("x".to_string()),
            ..Default::default()
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}
