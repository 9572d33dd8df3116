//! Account registration and password login.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{email_verification::EmailVerificationRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::user::{CreateUserParams, RegisterParams, User},
    util::password::{
        hash_password, normalize_email, validate_email, validate_handle,
        validate_password_strength, verify_password,
    },
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account for a verified email address.
    ///
    /// The first account ever created is granted admin. The email verification record
    /// is consumed on success.
    ///
    /// # Returns
    /// - `Ok(User)` - Newly created user
    /// - `Err(AppError::BadRequest)` - Invalid email, handle or weak password
    /// - `Err(AppError::AuthErr(EmailNotVerified))` - Email was not verified first
    /// - `Err(AppError::Conflict)` - Email or handle already taken
    pub async fn register(&self, params: RegisterParams) -> Result<User, AppError> {
        let email = normalize_email(&params.email);
        let handle = params.handle.trim().to_string();

        validate_email(&email)?;
        validate_handle(&handle)?;
        validate_password_strength(&params.password)?;

        let verification_repo = EmailVerificationRepository::new(self.db);
        let verified = verification_repo
            .find_by_email(&email)
            .await?
            .is_some_and(|record| record.verified);
        if !verified {
            return Err(AuthError::EmailNotVerified.into());
        }

        let user_repo = UserRepository::new(self.db);
        if user_repo.email_exists(&email).await? {
            return Err(AppError::Conflict("Email address is already registered".to_string()));
        }
        if user_repo.handle_exists(&handle).await? {
            return Err(AppError::Conflict(format!("Handle '{}' is already taken", handle)));
        }

        let password_hash = hash_password(&params.password)?;
        let admin = !user_repo.admin_exists().await?;

        let user = user_repo
            .create(CreateUserParams {
                email: email.clone(),
                handle,
                password_hash,
                admin,
            })
            .await?;

        verification_repo.delete_by_email(&email).await?;

        if admin {
            tracing::info!(user_id = user.id, "First account registered, granted admin");
        }

        Ok(user)
    }

    /// Checks credentials.
    ///
    /// # Returns
    /// - `Ok(User)` - Credentials valid and account active
    /// - `Err(AppError::AuthErr(InvalidCredentials))` - Unknown email or wrong password
    /// - `Err(AppError::AuthErr(UserSuspended))` - Account suspended
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = normalize_email(email);

        let Some(user) = UserRepository::new(self.db).find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }
        if user.is_suspended() {
            return Err(AuthError::UserSuspended(user.id).into());
        }

        Ok(user)
    }
}
