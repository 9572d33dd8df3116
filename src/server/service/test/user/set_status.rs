use super::*;

/// Tests an admin suspending and reactivating another user.
///
/// Expected: Ok with the status applied each time
#[tokio::test]
async fn admin_suspends_and_reactivates() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = user(db, true).await?;
    let member = user(db, false).await?;
    let service = UserService::new(db);

    let suspended = service
        .set_status(
            &admin,
            SetStatusParam {
                user_id: member.id,
                status: UserStatus::Suspended,
            },
        )
        .await?;
    assert!(suspended.is_suspended());

    let active = service
        .set_status(
            &admin,
            SetStatusParam {
                user_id: member.id,
                status: UserStatus::Active,
            },
        )
        .await?;
    assert_eq!(active.status, UserStatus::Active);

    Ok(())
}

/// Tests a non-admin changing account status.
///
/// Expected: Err(AccessDenied)
#[tokio::test]
async fn requires_admin() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let member = user(db, false).await?;
    let other = user(db, false).await?;

    let result = UserService::new(db)
        .set_status(
            &member,
            SetStatusParam {
                user_id: other.id,
                status: UserStatus::Suspended,
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests an admin suspending their own account.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn admin_cannot_suspend_self() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = user(db, true).await?;

    let result = UserService::new(db)
        .set_status(
            &admin,
            SetStatusParam {
                user_id: admin.id,
                status: UserStatus::Suspended,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests changing the status of a user that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn unknown_user_is_not_found() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = user(db, true).await?;

    let result = UserService::new(db)
        .set_status(
            &admin,
            SetStatusParam {
                user_id: admin.id + 100,
                status: UserStatus::Suspended,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
