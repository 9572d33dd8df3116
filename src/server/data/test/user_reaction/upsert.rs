use super::*;

/// Tests inserting and then replacing a reaction.
///
/// Verifies that the second upsert updates the same row instead of inserting a new one.
///
/// Expected: Ok with same ID and the latest flags
#[tokio::test]
async fn replaces_existing_flags() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_post_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, post) = factory::helpers::create_post_with_author(db).await?;
    let repo = UserReactionRepository::new(db);
    let target = ReactionTarget::post(post.id);

    assert!(repo.find(user.id, target).await?.is_none());

    let first = repo
        .upsert(
            user.id,
            target,
            ReactionFlags {
                liked: true,
                ..Default::default()
            },
        )
        .await?;
    let second = repo
        .upsert(
            user.id,
            target,
            ReactionFlags {
                disliked: true,
                bookmarked: true,
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(first.id, second.id);
    let stored = repo.find(user.id, target).await?.unwrap();
    assert!(!stored.flags.liked);
    assert!(stored.flags.disliked);
    assert!(stored.flags.bookmarked);

    Ok(())
}

/// Tests that post and comment reactions with the same ID are separate.
///
/// Expected: Ok(None) for the comment target
#[tokio::test]
async fn separates_target_types() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_post_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, post) = factory::helpers::create_post_with_author(db).await?;
    factory::user_reaction::create_user_reaction(db, user.id, post.id).await?;

    let repo = UserReactionRepository::new(db);
    assert!(repo.find(user.id, ReactionTarget::post(post.id)).await?.is_some());
    assert!(repo
        .find(user.id, ReactionTarget::comment(post.id))
        .await?
        .is_none());

    Ok(())
}
