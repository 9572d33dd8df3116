use super::*;

/// Tests incrementing and decrementing counters.
///
/// Expected: Ok with counter reflecting the deltas
#[tokio::test]
async fn adjusts_counter() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_post_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, post) = factory::helpers::create_post_with_author(db).await?;
    let repo = PostRepository::new(db);

    repo.increment_counter(post.id, PostCounter::Like, 3).await?;
    repo.increment_counter(post.id, PostCounter::Like, -1).await?;
    repo.increment_counter(post.id, PostCounter::View, 1).await?;

    let post = repo.get_by_id(post.id).await?.unwrap();
    assert_eq!(post.like_count, 2);
    assert_eq!(post.view_count, 1);

    Ok(())
}

/// Tests that decrements saturate at zero.
///
/// Expected: Ok with counter at 0
#[tokio::test]
async fn saturates_at_zero() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_post_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let post = factory::post::PostFactory::new(db, author.id)
        .comment_count(1)
        .build()
        .await?;
    let repo = PostRepository::new(db);

    repo.increment_counter(post.id, PostCounter::Comment, -5).await?;

    let post = repo.get_by_id(post.id).await?.unwrap();
    assert_eq!(post.comment_count, 0);

    Ok(())
}

/// Tests adjusting a counter on a missing post.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_missing_post() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_post_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PostRepository::new(db);
    assert!(!repo.increment_counter(7, PostCounter::Like, 1).await?);

    Ok(())
}
