use super::*;

/// Tests optional resolution for anonymous and logged in requests.
///
/// Expected: Ok(None) without a session user, Ok(Some(User)) after login
#[tokio::test]
async fn resolves_session_user_when_present() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    assert!(AuthGuard::new(db, session).optional().await?.is_none());

    let user = factory::user::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let viewer = AuthGuard::new(db, session).optional().await?;
    assert_eq!(viewer.map(|u| u.id), Some(user.id));

    Ok(())
}

/// Tests that suspended users are treated as anonymous viewers.
///
/// Expected: Ok(None)
#[tokio::test]
async fn treats_suspended_user_as_anonymous() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::UserFactory::new(db)
        .status("suspended")
        .build()
        .await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    assert!(AuthGuard::new(db, session).optional().await?.is_none());

    Ok(())
}
