use super::*;

/// Tests soft deleting a post.
///
/// Verifies that the post disappears from reads and a second delete is a no-op.
///
/// Expected: Ok(true) then Ok(false)
#[tokio::test]
async fn hides_post_after_delete() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_post_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (author, post) = factory::helpers::create_post_with_author(db).await?;
    let repo = PostRepository::new(db);

    assert!(repo.soft_delete(post.id).await?);
    assert!(repo.get_by_id(post.id).await?.is_none());
    assert_eq!(repo.count_by_author(author.id).await?, 0);
    assert!(!repo.soft_delete(post.id).await?);

    Ok(())
}
