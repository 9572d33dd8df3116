use super::*;

/// Tests creating a post with valid fields.
///
/// Expected: Ok with trimmed title, slug ending in the id, and empty metadata object
#[tokio::test]
async fn creates_post_with_slug() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = user(db, false).await?;

    let post = PostService::new(db)
        .create(&author, params("  Need a Plumber!  "))
        .await?;

    assert_eq!(post.title, "Need a Plumber!");
    assert_eq!(post.author_id, author.id);
    assert_eq!(post.slug, format!("need-a-plumber-{}", post.id));
    assert_eq!(post.metadata, serde_json::json!({}));
    assert_eq!(post.status, ContentStatus::Active);

    Ok(())
}

/// Tests creating posts with invalid fields.
///
/// Expected: Err(BadRequest) for blank title, blank content, blank category and array metadata
#[tokio::test]
async fn rejects_invalid_fields() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = user(db, false).await?;
    let service = PostService::new(db);

    let blank_content = CreatePostParams {
        content: "   ".to_string(),
        ..params("Title")
    };
    let blank_category = CreatePostParams {
        category: String::new(),
        ..params("Title")
    };
    let bad_metadata = CreatePostParams {
        metadata: serde_json::json!(["a"]),
        ..params("Title")
    };

    for invalid in [params("   "), blank_content, blank_category, bad_metadata] {
        assert!(matches!(
            service.create(&author, invalid).await,
            Err(AppError::BadRequest(_))
        ));
    }

    Ok(())
}
