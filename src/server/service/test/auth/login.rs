use super::*;

/// Tests logging in with correct credentials.
///
/// Expected: Ok with the matching user
#[tokio::test]
async fn accepts_valid_credentials() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::UserFactory::new(db)
        .email("ada@example.com")
        .password_hash(hash_password("correct1horse")?)
        .build()
        .await?;

    let user = AuthService::new(db)
        .login("ADA@example.com", "correct1horse")
        .await?;

    assert_eq!(user.id, created.id);

    Ok(())
}

/// Tests logging in with a wrong password or unknown email.
///
/// Expected: Err(InvalidCredentials) in both cases
#[tokio::test]
async fn rejects_invalid_credentials() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .email("ada@example.com")
        .password_hash(hash_password("correct1horse")?)
        .build()
        .await?;
    let service = AuthService::new(db);

    assert!(matches!(
        service.login("ada@example.com", "wrong1horse").await,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        service.login("nobody@example.com", "correct1horse").await,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    Ok(())
}

/// Tests logging in to a suspended account.
///
/// Expected: Err(UserSuspended)
#[tokio::test]
async fn rejects_suspended_user() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .email("ada@example.com")
        .password_hash(hash_password("correct1horse")?)
        .status("suspended")
        .build()
        .await?;

    let result = AuthService::new(db)
        .login("ada@example.com", "correct1horse")
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserSuspended(_)))
    ));

    Ok(())
}
