use super::*;

/// Tests paginating users ordered by handle.
///
/// Verifies page contents and that the total reflects all users.
///
/// Expected: Ok with 2 users on page 0, 1 user on page 1, total 3
#[tokio::test]
async fn paginates_by_handle() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for handle in ["charlie", "alpha", "bravo"] {
        factory::user::UserFactory::new(db).handle(handle).build().await?;
    }

    let repo = UserRepository::new(db);
    let (first, total) = repo.get_all_paginated(0, 2).await?;
    let (second, _) = repo.get_all_paginated(1, 2).await?;

    assert_eq!(total, 3);
    assert_eq!(
        first.iter().map(|u| u.handle.as_str()).collect::<Vec<_>>(),
        vec!["alpha", "bravo"]
    );
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].handle, "charlie");

    Ok(())
}
