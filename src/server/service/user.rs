//! User administration.
//!
//! Provides the `UserService` for listing accounts and changing their admin and
//! moderation state. Every mutating operation takes the acting user and requires admin.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::{
        pagination::Paginated,
        user::{SetAdminParam, SetStatusParam, User, UserStatus},
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_user(&self, user_id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Retrieves users ordered by handle.
    pub async fn get_all_users(&self, page: u64, per_page: u64) -> Result<Paginated<User>, AppError> {
        let (users, total) = UserRepository::new(self.db)
            .get_all_paginated(page, per_page)
            .await?;

        Ok(Paginated::new(users, total, page, per_page))
    }

    /// Suspends or reactivates an account.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::AuthErr(AccessDenied))` - Actor is not an admin
    /// - `Err(AppError::BadRequest)` - Actor tried to suspend themselves
    /// - `Err(AppError::NotFound)` - Target user does not exist
    pub async fn set_status(&self, actor: &User, param: SetStatusParam) -> Result<User, AppError> {
        require_admin(actor, "change account status")?;

        if actor.id == param.user_id && param.status == UserStatus::Suspended {
            return Err(AppError::BadRequest(
                "Admins cannot suspend their own account".to_string(),
            ));
        }

        let repo = UserRepository::new(self.db);
        if !repo.set_status(param.user_id, param.status).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tracing::info!(
            actor_id = actor.id,
            user_id = param.user_id,
            status = param.status.as_str(),
            "User status changed"
        );

        self.get_user(param.user_id).await
    }

    /// Grants or revokes admin.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::AuthErr(AccessDenied))` - Actor is not an admin
    /// - `Err(AppError::BadRequest)` - Actor tried to revoke their own admin
    /// - `Err(AppError::NotFound)` - Target user does not exist
    pub async fn set_admin(&self, actor: &User, param: SetAdminParam) -> Result<User, AppError> {
        require_admin(actor, "change admin status")?;

        if actor.id == param.user_id && !param.is_admin {
            return Err(AppError::BadRequest(
                "Admins cannot revoke their own admin status".to_string(),
            ));
        }

        let repo = UserRepository::new(self.db);
        if !repo.set_admin(param.user_id, param.is_admin).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tracing::info!(
            actor_id = actor.id,
            user_id = param.user_id,
            admin = param.is_admin,
            "User admin status changed"
        );

        self.get_user(param.user_id).await
    }
}

fn require_admin(actor: &User, action: &str) -> Result<(), AppError> {
    if actor.admin {
        Ok(())
    } else {
        Err(AuthError::AccessDenied(actor.id, format!("admin required to {}", action)).into())
    }
}
