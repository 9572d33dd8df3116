use super::*;

/// Tests replacing comment content.
///
/// Expected: Ok(Some) with new content
#[tokio::test]
async fn replaces_content() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comment_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (author, post) = factory::helpers::create_post_with_author(db).await?;
    let comment = factory::comment::create_comment(db, post.id, author.id).await?;

    let repo = CommentRepository::new(db);
    let updated = repo
        .update_content(comment.id, "edited".to_string())
        .await?
        .unwrap();

    assert_eq!(updated.content, "edited");

    Ok(())
}

/// Tests editing a deleted comment.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_deleted_comment() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comment_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (author, post) = factory::helpers::create_post_with_author(db).await?;
    let comment = factory::comment::CommentFactory::new(db, post.id, author.id)
        .status("deleted")
        .build()
        .await?;

    let repo = CommentRepository::new(db);
    assert!(repo
        .update_content(comment.id, "edited".to_string())
        .await?
        .is_none());

    Ok(())
}
