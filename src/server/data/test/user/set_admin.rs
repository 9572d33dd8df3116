use super::*;

/// Tests granting and revoking admin status.
///
/// Expected: Ok(true) for each update with the admin flag persisted
#[tokio::test]
async fn toggles_admin_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = UserRepository::new(db);

    assert!(repo.set_admin(user.id, true).await?);
    assert!(repo.find_by_id(user.id).await?.unwrap().admin);

    assert!(repo.set_admin(user.id, false).await?);
    assert!(!repo.find_by_id(user.id).await?.unwrap().admin);

    Ok(())
}

/// Tests setting admin status for non-existent user.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_nonexistent_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    assert!(!repo.set_admin(999, true).await?);

    Ok(())
}
