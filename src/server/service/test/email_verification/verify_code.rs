use super::*;

/// Reads whether the stored record for `email` is verified.
async fn is_verified(db: &sea_orm::DatabaseConnection, email: &str) -> Result<bool, AppError> {
    let record = EmailVerificationRepository::new(db).find_by_email(email).await?;

    Ok(record.is_some_and(|r| r.verified))
}

/// Tests verifying with the correct code.
///
/// Expected: Ok with verified record stored as verified
#[tokio::test]
async fn marks_verified_on_match() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let sender = sender();
    let service = EmailVerificationService::new(db, &sender, VerificationSettings::default());

    factory::email_verification::EmailVerificationFactory::new(db, "ada@example.com")
        .code("654321")
        .build()
        .await?;

    let record = service.verify_code("ada@example.com", "654321").await?;

    assert!(record.verified);
    assert!(is_verified(db, "ada@example.com").await?);

    Ok(())
}

/// Tests verifying with a wrong code.
///
/// Expected: Err(BadRequest) and attempts incremented
#[tokio::test]
async fn counts_wrong_attempts() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let sender = sender();
    let service = EmailVerificationService::new(db, &sender, VerificationSettings::default());

    factory::email_verification::EmailVerificationFactory::new(db, "ada@example.com")
        .code("654321")
        .build()
        .await?;

    let result = service.verify_code("ada@example.com", "000000").await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    let stored = EmailVerificationRepository::new(db)
        .find_by_email("ada@example.com")
        .await?
        .unwrap();
    assert_eq!(stored.attempts, 1);
    assert!(!stored.verified);

    Ok(())
}

/// Tests that the attempt limit blocks even the correct code.
///
/// Expected: Err(BadRequest) once attempts reach the maximum
#[tokio::test]
async fn blocks_after_max_attempts() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let sender = sender();
    let service = EmailVerificationService::new(db, &sender, VerificationSettings::default());

    factory::email_verification::EmailVerificationFactory::new(db, "ada@example.com")
        .code("654321")
        .attempts(5)
        .build()
        .await?;

    let result = service.verify_code("ada@example.com", "654321").await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert!(!is_verified(db, "ada@example.com").await?);

    Ok(())
}

/// Tests verifying an expired code.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_expired_code() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let sender = sender();
    let service = EmailVerificationService::new(db, &sender, VerificationSettings::default());

    factory::email_verification::EmailVerificationFactory::new(db, "ada@example.com")
        .code("654321")
        .expires_at(Utc::now() - Duration::minutes(1))
        .build()
        .await?;

    let result = service.verify_code("ada@example.com", "654321").await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests verifying an email that never requested a code.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn missing_record_is_not_found() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let sender = sender();

    let result = EmailVerificationService::new(db, &sender, VerificationSettings::default())
        .verify_code("ada@example.com", "654321")
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests purging expired codes.
///
/// Expected: only the expired unverified record is removed
#[tokio::test]
async fn purges_expired_unverified() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let sender = sender();
    let service = EmailVerificationService::new(db, &sender, VerificationSettings::default());

    factory::email_verification::EmailVerificationFactory::new(db, "stale@example.com")
        .expires_at(Utc::now() - Duration::minutes(10))
        .build()
        .await?;
    factory::email_verification::EmailVerificationFactory::new(db, "done@example.com")
        .expires_at(Utc::now() - Duration::minutes(10))
        .verified(true)
        .build()
        .await?;

    assert_eq!(service.purge_expired().await?, 1);
    assert!(is_verified(db, "done@example.com").await?);
    assert!(EmailVerificationRepository::new(db)
        .find_by_email("stale@example.com")
        .await?
        .is_none());

    Ok(())
}

/// Tests a burst of simultaneous wrong guesses near the attempt limit.
///
/// Expected: the counter stops at the maximum and every guess past it is refused
#[tokio::test]
async fn concurrent_wrong_guesses_stop_at_limit() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let sender = sender();
    let service = EmailVerificationService::new(db, &sender, VerificationSettings::default());

    factory::email_verification::EmailVerificationFactory::new(db, "ada@example.com")
        .code("654321")
        .attempts(3)
        .build()
        .await?;

    let (a, b, c, d) = tokio::join!(
        service.verify_code("ada@example.com", "000001"),
        service.verify_code("ada@example.com", "000002"),
        service.verify_code("ada@example.com", "000003"),
        service.verify_code("ada@example.com", "000004"),
    );

    for result in [a, b, c, d] {
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
    let stored = EmailVerificationRepository::new(db)
        .find_by_email("ada@example.com")
        .await?
        .unwrap();
    assert_eq!(stored.attempts, 5);

    Ok(())
}
