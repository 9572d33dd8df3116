use super::*;

/// Tests registering with a verified email.
///
/// Verifies that the first account becomes admin, the email is normalized and the
/// verification record is consumed.
///
/// Expected: Ok with admin user and no verification record left
#[tokio::test]
async fn first_user_becomes_admin() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::email_verification::EmailVerificationFactory::new(db, "ada@example.com")
        .verified(true)
        .build()
        .await?;

    let user = AuthService::new(db)
        .register(params(" Ada@Example.com ", "ada"))
        .await?;

    assert_eq!(user.email, "ada@example.com");
    assert!(user.admin);
    assert_ne!(user.password_hash, "correct1horse");
    assert!(EmailVerificationRepository::new(db)
        .find_by_email("ada@example.com")
        .await?
        .is_none());

    Ok(())
}

/// Tests that later accounts are regular users.
///
/// Expected: Ok with admin false
#[tokio::test]
async fn later_users_are_not_admin() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db).admin(true).build().await?;
    factory::email_verification::EmailVerificationFactory::new(db, "bob@example.com")
        .verified(true)
        .build()
        .await?;

    let user = AuthService::new(db)
        .register(params("bob@example.com", "bob"))
        .await?;

    assert!(!user.admin);

    Ok(())
}

/// Tests registering without verifying the email.
///
/// Expected: Err(EmailNotVerified) for missing and unverified records
#[tokio::test]
async fn requires_verified_email() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = AuthService::new(db);

    let result = service.register(params("ada@example.com", "ada")).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::EmailNotVerified))
    ));

    factory::email_verification::create_email_verification(db, "ada@example.com").await?;
    let result = service.register(params("ada@example.com", "ada")).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::EmailNotVerified))
    ));

    Ok(())
}

/// Tests registering with a taken handle.
///
/// Expected: Err(Conflict) and the verification record is kept
#[tokio::test]
async fn rejects_duplicate_handle() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db).handle("ada").build().await?;
    factory::email_verification::EmailVerificationFactory::new(db, "ada@example.com")
        .verified(true)
        .build()
        .await?;

    let result = AuthService::new(db)
        .register(params("ada@example.com", "ada"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(EmailVerificationRepository::new(db)
        .find_by_email("ada@example.com")
        .await?
        .is_some());

    Ok(())
}

/// Tests input validation before any lookup.
///
/// Expected: Err(BadRequest) for a bad handle and a weak password
#[tokio::test]
async fn validates_handle_and_password() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = AuthService::new(db);

    let result = service.register(params("ada@example.com", "Ada!")).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let mut weak = params("ada@example.com", "ada");
    weak.password = "password".to_string();
    assert!(matches!(
        service.register(weak).await,
        Err(AppError::BadRequest(_))
    ));

    assert!(!UserRepository::new(db).email_exists("ada@example.com").await?);

    Ok(())
}
