use super::*;

/// Tests issuing a code for a new email.
///
/// Expected: Ok with a stored 6-digit code expiring after the TTL
#[tokio::test]
async fn stores_new_code() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let sender = sender();
    let service = EmailVerificationService::new(db, &sender, VerificationSettings::default());

    let before = Utc::now();
    let record = service.send_code(" Ada@Example.com").await?;

    assert_eq!(record.email, "ada@example.com");
    assert_eq!(record.code.len(), 6);
    assert!(!record.verified);
    assert!(record.expires_at >= before + Duration::seconds(299));

    let stored = EmailVerificationRepository::new(db)
        .find_by_email("ada@example.com")
        .await?
        .unwrap();
    assert_eq!(stored.code, record.code);

    Ok(())
}

/// Tests that requesting again resets attempts and verification.
///
/// Expected: Ok with attempts 0 and verified false
#[tokio::test]
async fn resending_resets_state() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let sender = sender();

    factory::email_verification::EmailVerificationFactory::new(db, "ada@example.com")
        .attempts(4)
        .verified(true)
        .build()
        .await?;

    let record = EmailVerificationService::new(db, &sender, VerificationSettings::default())
        .send_code("ada@example.com")
        .await?;

    assert_eq!(record.attempts, 0);
    assert!(!record.verified);

    Ok(())
}

/// Tests requesting a code for a registered or malformed email.
///
/// Expected: Err(BadRequest) in both cases
#[tokio::test]
async fn rejects_registered_and_invalid_emails() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let sender = sender();
    let service = EmailVerificationService::new(db, &sender, VerificationSettings::default());

    factory::user::UserFactory::new(db)
        .email("taken@example.com")
        .build()
        .await?;

    assert!(matches!(
        service.send_code("taken@example.com").await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.send_code("not-an-email").await,
        Err(AppError::BadRequest(_))
    ));

    Ok(())
}
