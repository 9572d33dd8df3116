use super::*;

/// Tests liked posts skipping a post that was deleted after the like.
///
/// Expected: only the live post is returned while total counts both
#[tokio::test]
async fn liked_posts_skip_deleted() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let member = user(db, false).await?;
    let author = user(db, false).await?;

    let live = factory::post::create_post(db, author.id).await?;
    let gone = factory::post::PostFactory::new(db, author.id)
        .status("deleted")
        .build()
        .await?;
    factory::user_reaction::create_user_reaction(db, member.id, live.id).await?;
    factory::user_reaction::create_user_reaction(db, member.id, gone.id).await?;

    let page = ActivityService::new(db).liked_posts(member.id, 0, 10).await?;

    assert_eq!(page.total, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, live.id);

    Ok(())
}

/// Tests that bookmarked posts only include bookmarks.
///
/// Expected: the liked-only post is excluded
#[tokio::test]
async fn bookmarked_posts_only() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let member = user(db, false).await?;
    let author = user(db, false).await?;

    let saved = factory::post::create_post(db, author.id).await?;
    let liked = factory::post::create_post(db, author.id).await?;
    factory::user_reaction::UserReactionFactory::new(db, member.id, saved.id)
        .bookmarked(true)
        .build()
        .await?;
    factory::user_reaction::create_user_reaction(db, member.id, liked.id).await?;

    let page = ActivityService::new(db)
        .bookmarked_posts(member.id, 0, 10)
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, saved.id);

    Ok(())
}
