use super::*;

/// Tests purging expired codes.
///
/// Verifies that only expired, unverified records are removed.
///
/// Expected: Ok(1) with the fresh and verified records kept
#[tokio::test]
async fn removes_only_expired_unverified() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EmailVerification)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::email_verification::EmailVerificationFactory::new(db, "old@example.com")
        .expires_at(now - Duration::minutes(1))
        .build()
        .await?;
    factory::email_verification::EmailVerificationFactory::new(db, "verified@example.com")
        .expires_at(now - Duration::minutes(1))
        .verified(true)
        .build()
        .await?;
    factory::email_verification::EmailVerificationFactory::new(db, "fresh@example.com")
        .expires_at(now + Duration::minutes(5))
        .build()
        .await?;

    let repo = EmailVerificationRepository::new(db);
    assert_eq!(repo.delete_expired(now).await?, 1);
    assert!(repo.find_by_email("old@example.com").await?.is_none());
    assert!(repo.find_by_email("verified@example.com").await?.is_some());
    assert!(repo.find_by_email("fresh@example.com").await?.is_some());

    Ok(())
}
