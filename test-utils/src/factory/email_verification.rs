//! Email verification factory for creating test verification records.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating email verification records.
pub struct EmailVerificationFactory<'a> {
    db: &'a DatabaseConnection,
    email: String,
    code: String,
    expires_at: DateTime<Utc>,
    attempts: i32,
    verified: bool,
}

impl<'a> EmailVerificationFactory<'a> {
    /// Creates a new factory.
    ///
    /// Defaults:
    /// - code: `"123456"`
    /// - expires_at: 5 minutes from now
    /// - attempts: 0, verified: `false`
    pub fn new(db: &'a DatabaseConnection, email: impl Into<String>) -> Self {
        Self {
            db,
            email: email.into(),
            code: "123456".to_string(),
            expires_at: Utc::now() + Duration::minutes(5),
            attempts: 0,
            verified: false,
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub fn attempts(mut self, attempts: i32) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    pub async fn build(self) -> Result<entity::email_verification::Model, DbErr> {
        entity::email_verification::ActiveModel {
            email: ActiveValue::Set(self.email),
            code: ActiveValue::Set(self.code),
            expires_at: ActiveValue::Set(self.expires_at),
            attempts: ActiveValue::Set(self.attempts),
            verified: ActiveValue::Set(self.verified),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unverified, unexpired verification record with code `"123456"`.
pub async fn create_email_verification(
    db: &DatabaseConnection,
    email: impl Into<String>,
) -> Result<entity::email_verification::Model, DbErr> {
    EmailVerificationFactory::new(db, email).build().await
}
