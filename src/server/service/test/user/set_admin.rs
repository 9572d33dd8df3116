use super::*;

/// Tests an admin promoting another user.
///
/// Expected: Ok with admin set on the target
#[tokio::test]
async fn admin_grants_admin() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = user(db, true).await?;
    let member = user(db, false).await?;

    let promoted = UserService::new(db)
        .set_admin(
            &admin,
            SetAdminParam {
                user_id: member.id,
                is_admin: true,
            },
        )
        .await?;

    assert!(promoted.admin);

    Ok(())
}

/// Tests an admin revoking their own admin status.
///
/// Expected: Err(BadRequest) and the admin flag unchanged
#[tokio::test]
async fn admin_cannot_revoke_self() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = user(db, true).await?;
    let service = UserService::new(db);

    let result = service
        .set_admin(
            &admin,
            SetAdminParam {
                user_id: admin.id,
                is_admin: false,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert!(service.get_user(admin.id).await?.admin);

    Ok(())
}

/// Tests a non-admin granting admin to themselves.
///
/// Expected: Err(AccessDenied)
#[tokio::test]
async fn member_cannot_grant_admin() -> Result<(), AppError> {
    let test = builder().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let member = user(db, false).await?;

    let result = UserService::new(db)
        .set_admin(
            &member,
            SetAdminParam {
                user_id: member.id,
                is_admin: true,
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}
