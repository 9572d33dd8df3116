use super::*;

/// Tests finding users by email, handle and ID.
///
/// Expected: Ok(Some) for existing users, Ok(None) for unknown lookups
#[tokio::test]
async fn finds_existing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .email("found@example.com")
        .handle("found")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    assert_eq!(
        repo.find_by_email("found@example.com").await?.map(|u| u.id),
        Some(user.id)
    );
    assert_eq!(repo.find_by_handle("found").await?.map(|u| u.id), Some(user.id));
    assert!(repo.find_by_id(user.id).await?.is_some());

    assert!(repo.find_by_email("missing@example.com").await?.is_none());
    assert!(repo.email_exists("found@example.com").await?);
    assert!(!repo.handle_exists("missing").await?);

    Ok(())
}
