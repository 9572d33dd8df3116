use super::*;

/// Tests listing and counting bookmarked post IDs.
///
/// Expected: Ok with only bookmarked post targets
#[tokio::test]
async fn lists_flagged_targets() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_post_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, first) = factory::helpers::create_post_with_author(db).await?;
    let second = factory::post::create_post(db, user.id).await?;
    let third = factory::post::create_post(db, user.id).await?;

    factory::user_reaction::UserReactionFactory::new(db, user.id, first.id)
        .bookmarked(true)
        .build()
        .await?;
    factory::user_reaction::UserReactionFactory::new(db, user.id, second.id)
        .liked(true)
        .build()
        .await?;
    factory::user_reaction::UserReactionFactory::new(db, user.id, third.id)
        .target_type("comment")
        .bookmarked(true)
        .build()
        .await?;

    let repo = UserReactionRepository::new(db);
    let (ids, total) = repo
        .get_target_ids_by_flag(user.id, TargetType::Post, ReactionFlag::Bookmarked, 0, 10)
        .await?;

    assert_eq!(ids, vec![first.id]);
    assert_eq!(total, 1);
    assert_eq!(
        repo.count_by_user_flag(user.id, TargetType::Post, ReactionFlag::Liked)
            .await?,
        1
    );

    Ok(())
}
