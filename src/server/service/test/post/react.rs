use super::*;

/// Tests toggling a like on and off.
///
/// Expected: like_count goes 1 then 0 and the flag follows
#[tokio::test]
async fn like_toggles() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = user(db, false).await?;
    let reader = user(db, false).await?;
    let service = PostService::new(db);
    let post = service.create(&author, params("Likeable")).await?;

    let liked = service.react(&reader, post.id, ReactionKind::Like).await?;
    assert!(liked.flags.liked);
    assert_eq!(liked.like_count, 1);

    let unliked = service.react(&reader, post.id, ReactionKind::Like).await?;
    assert!(!unliked.flags.liked);
    assert_eq!(unliked.like_count, 0);

    Ok(())
}

/// Tests switching from like to dislike.
///
/// Expected: like removed, dislike added, both counters moved
#[tokio::test]
async fn dislike_replaces_like() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = user(db, false).await?;
    let reader = user(db, false).await?;
    let service = PostService::new(db);
    let post = service.create(&author, params("Divisive")).await?;

    service.react(&reader, post.id, ReactionKind::Like).await?;
    let state = service
        .react(&reader, post.id, ReactionKind::Dislike)
        .await?;

    assert!(!state.flags.liked);
    assert!(state.flags.disliked);
    assert_eq!(state.like_count, 0);
    assert_eq!(state.dislike_count, 1);

    Ok(())
}

/// Tests that bookmarks are independent of likes.
///
/// Expected: both flags set, bookmark_count 1
#[tokio::test]
async fn bookmark_is_independent() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let author = user(db, false).await?;
    let reader = user(db, false).await?;
    let service = PostService::new(db);
    let post = service.create(&author, params("Save for later")).await?;

    service.react(&reader, post.id, ReactionKind::Like).await?;
    let state = service
        .react(&reader, post.id, ReactionKind::Bookmark)
        .await?;

    assert!(state.flags.liked);
    assert!(state.flags.bookmarked);
    assert_eq!(state.bookmark_count, 1);
    assert_eq!(
        service.get_reaction(&reader, post.id).await?.flags,
        state.flags
    );

    Ok(())
}
