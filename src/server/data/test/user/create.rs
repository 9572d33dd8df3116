use super::*;

/// Tests creating a new user.
///
/// Verifies that the repository inserts the user as active with the provided
/// email, handle and admin flag.
///
/// Expected: Ok with active user
#[tokio::test]
async fn creates_active_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(params("a@example.com", "alice")).await?;

    assert_eq!(user.email, "a@example.com");
    assert_eq!(user.handle, "alice");
    assert_eq!(user.status, UserStatus::Active);
    assert!(!user.admin);

    Ok(())
}

/// Tests creating a user with a taken email.
///
/// Verifies that the unique constraint on email rejects the second insert.
///
/// Expected: Err(DbErr)
#[tokio::test]
async fn fails_for_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(params("a@example.com", "alice")).await?;
    let result = repo.create(params("a@example.com", "alice2")).await;

    assert!(result.is_err());

    Ok(())
}
