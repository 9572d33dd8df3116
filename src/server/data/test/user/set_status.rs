use super::*;

/// Tests suspending and reactivating a user.
///
/// Expected: Ok(true) with the stored status updated each time
#[tokio::test]
async fn suspends_and_reactivates() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = UserRepository::new(db);

    assert!(repo.set_status(user.id, UserStatus::Suspended).await?);
    assert!(repo.find_by_id(user.id).await?.unwrap().is_suspended());

    assert!(repo.set_status(user.id, UserStatus::Active).await?);
    assert_eq!(
        repo.find_by_id(user.id).await?.unwrap().status,
        UserStatus::Active
    );

    Ok(())
}
