use super::*;

/// Tests handle lookup for a mix of known and unknown IDs.
///
/// Expected: Ok with handles for existing users only
#[tokio::test]
async fn maps_existing_ids_to_handles() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::user::UserFactory::new(db).handle("alice").build().await?;
    let bob = factory::user::UserFactory::new(db).handle("bob").build().await?;

    let repo = UserRepository::new(db);
    let handles = repo.get_handles(&[alice.id, bob.id, 9999]).await?;

    assert_eq!(handles.len(), 2);
    assert_eq!(handles.get(&alice.id).map(String::as_str), Some("alice"));
    assert_eq!(handles.get(&bob.id).map(String::as_str), Some("bob"));
    assert!(repo.get_handles(&[]).await?.is_empty());

    Ok(())
}
