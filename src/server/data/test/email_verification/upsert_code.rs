use super::*;

/// Tests issuing a new code over an existing record.
///
/// Verifies that the code and expiry are replaced and attempts/verified are reset.
///
/// Expected: Ok with fresh record state on the same row
#[tokio::test]
async fn replaces_code_and_resets_state() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EmailVerification)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::email_verification::EmailVerificationFactory::new(db, "a@example.com")
        .attempts(3)
        .verified(true)
        .build()
        .await?;

    let repo = EmailVerificationRepository::new(db);
    let expires_at = Utc::now() + Duration::minutes(5);
    let record = repo
        .upsert_code("a@example.com", "654321", expires_at)
        .await?;

    assert_eq!(record.id, existing.id);
    assert_eq!(record.code, "654321");
    assert_eq!(record.attempts, 0);
    assert!(!record.verified);

    let found = repo.find_by_email("a@example.com").await?.unwrap();
    assert_eq!(found.code, "654321");

    Ok(())
}
