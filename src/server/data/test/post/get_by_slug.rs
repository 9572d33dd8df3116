use super::*;

/// Tests fetching a post by slug and by ID.
///
/// Expected: Ok(Some) for the created post, Ok(None) for unknown values
#[tokio::test]
async fn finds_active_post() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_post_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let repo = PostRepository::new(db);
    let post = repo.create(params(author.id, "Find me")).await?;

    assert_eq!(repo.get_by_slug(&post.slug).await?.map(|p| p.id), Some(post.id));
    assert_eq!(repo.get_by_id(post.id).await?.map(|p| p.id), Some(post.id));
    assert!(repo.get_by_slug("missing-1").await?.is_none());

    Ok(())
}

/// Tests that deleted posts are hidden from slug lookups.
///
/// Expected: Ok(None)
#[tokio::test]
async fn hides_deleted_post() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_post_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let post = factory::post::PostFactory::new(db, author.id)
        .slug("gone-1")
        .status("deleted")
        .build()
        .await?;

    let repo = PostRepository::new(db);
    assert!(repo.get_by_slug("gone-1").await?.is_none());
    assert!(repo.get_by_id(post.id).await?.is_none());

    Ok(())
}
