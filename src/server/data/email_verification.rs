//! Email verification code repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, ExprTrait, OnConflict},
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use crate::server::model::email_verification::EmailVerification;

/// Repository providing database operations for email verification codes.
///
/// Holds at most one record per email address; issuing a new code replaces the old one.
pub struct EmailVerificationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmailVerificationRepository<'a> {
    /// Creates a new EmailVerificationRepository instance.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a fresh code for an email, resetting attempts and verified state.
    ///
    /// # Arguments
    /// - `email` - Normalized email address
    /// - `code` - Newly generated code
    /// - `expires_at` - Instant after which the code is rejected
    ///
    /// # Returns
    /// - `Ok(EmailVerification)` - The stored record
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn upsert_code(
        &self,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<EmailVerification, DbErr> {
        let entity =
            entity::prelude::EmailVerification::insert(entity::email_verification::ActiveModel {
                email: ActiveValue::Set(email.to_string()),
                code: ActiveValue::Set(code.to_string()),
                expires_at: ActiveValue::Set(expires_at),
                attempts: ActiveValue::Set(0),
                verified: ActiveValue::Set(false),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            })
            .on_conflict(
                OnConflict::column(entity::email_verification::Column::Email)
                    .update_columns([
                        entity::email_verification::Column::Code,
                        entity::email_verification::Column::ExpiresAt,
                        entity::email_verification::Column::Attempts,
                        entity::email_verification::Column::Verified,
                        entity::email_verification::Column::CreatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await?;

        Ok(EmailVerification::from_entity(entity))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<EmailVerification>, DbErr> {
        let entity = entity::prelude::EmailVerification::find()
            .filter(entity::email_verification::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.map(EmailVerification::from_entity))
    }

    /// Increments the failed attempt counter unless it already reached `max`.
    ///
    /// The limit is checked in the same statement as the increment, so concurrent
    /// callers can never push the counter past `max`.
    ///
    /// # Returns
    /// - `Ok(true)` - Counter incremented
    /// - `Ok(false)` - Limit reached or no record with that ID
    /// - `Err(DbErr)` - Database error during update
    pub async fn increment_attempts_below(&self, id: i32, max: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::EmailVerification::update_many()
            .filter(entity::email_verification::Column::Id.eq(id))
            .filter(entity::email_verification::Column::Attempts.lt(max))
            .col_expr(
                entity::email_verification::Column::Attempts,
                Expr::col(entity::email_verification::Column::Attempts).add(1),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Marks the record as verified.
    ///
    /// # Returns
    /// - `Ok(true)` - Record updated
    /// - `Ok(false)` - No record with that ID
    pub async fn mark_verified(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::EmailVerification::update_many()
            .filter(entity::email_verification::Column::Id.eq(id))
            .col_expr(
                entity::email_verification::Column::Verified,
                Expr::value(true),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes the record for an email.
    ///
    /// # Returns
    /// - `Ok(true)` - A record was deleted
    /// - `Ok(false)` - No record existed
    pub async fn delete_by_email(&self, email: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::EmailVerification::delete_many()
            .filter(entity::email_verification::Column::Email.eq(email))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes unverified records whose code expired before `now`.
    ///
    /// Verified records are kept until consumed by registration.
    ///
    /// # Returns
    /// - `Ok(count)` - Number of deleted records
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::EmailVerification::delete_many()
            .filter(entity::email_verification::Column::ExpiresAt.lt(now))
            .filter(entity::email_verification::Column::Verified.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
