use super::*;

/// Tests incrementing attempts and marking verified.
///
/// Expected: Ok with attempts increasing by one per call until the limit
#[tokio::test]
async fn increments_and_verifies() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EmailVerification)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let record =
        factory::email_verification::create_email_verification(db, "b@example.com").await?;

    let repo = EmailVerificationRepository::new(db);
    assert!(repo.increment_attempts_below(record.id, 2).await?);
    assert!(repo.increment_attempts_below(record.id, 2).await?);
    assert!(!repo.increment_attempts_below(record.id, 2).await?);
    assert!(!repo.increment_attempts_below(999, 2).await?);
    assert_eq!(repo.find_by_email("b@example.com").await?.unwrap().attempts, 2);

    assert!(repo.mark_verified(record.id).await?);
    assert!(repo.find_by_email("b@example.com").await?.unwrap().verified);

    assert!(repo.delete_by_email("b@example.com").await?);
    assert!(repo.find_by_email("b@example.com").await?.is_none());

    Ok(())
}
