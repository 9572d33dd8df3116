use super::*;

/// Tests fetching posts by ID list.
///
/// Verifies that input order is preserved and missing or deleted posts are skipped.
///
/// Expected: Ok with posts in requested order
#[tokio::test]
async fn preserves_input_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_post_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let a = factory::post::create_post(db, author.id).await?;
    let b = factory::post::create_post(db, author.id).await?;
    let deleted = factory::post::PostFactory::new(db, author.id)
        .status("deleted")
        .build()
        .await?;

    let repo = PostRepository::new(db);
    let posts = repo.get_by_ids(&[b.id, 999, deleted.id, a.id]).await?;

    assert_eq!(
        posts.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![b.id, a.id]
    );
    assert!(repo.get_by_ids(&[]).await?.is_empty());

    Ok(())
}
