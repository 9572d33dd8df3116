//! Email ownership verification with short-lived numeric codes.
//!
//! A code is issued per email address and replaces any previous one. Verification is
//! limited by expiry and by a maximum number of wrong guesses. A verified record stays
//! until registration deletes it.

use chrono::Utc;
use rand::Rng;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{email_verification::EmailVerificationRepository, user::UserRepository},
    error::AppError,
    model::email_verification::{EmailVerification, VerificationSettings},
    service::email::EmailSender,
    util::password::{normalize_email, validate_email},
};

pub struct EmailVerificationService<'a> {
    db: &'a DatabaseConnection,
    sender: &'a EmailSender,
    settings: VerificationSettings,
}

impl<'a> EmailVerificationService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        sender: &'a EmailSender,
        settings: VerificationSettings,
    ) -> Self {
        Self {
            db,
            sender,
            settings,
        }
    }

    /// Issues a new 6-digit code for `email` and emails it.
    ///
    /// # Returns
    /// - `Ok(EmailVerification)` - Stored record with the new code
    /// - `Err(AppError::BadRequest)` - Invalid email or email already registered
    /// - `Err(AppError::SmtpErr)` - Code stored but the email could not be sent
    pub async fn send_code(&self, email: &str) -> Result<EmailVerification, AppError> {
        let email = normalize_email(email);
        validate_email(&email)?;

        if UserRepository::new(self.db).email_exists(&email).await? {
            return Err(AppError::BadRequest(
                "Email address is already registered".to_string(),
            ));
        }

        let code = generate_code();
        let expires_at = Utc::now() + self.settings.ttl;
        let record = EmailVerificationRepository::new(self.db)
            .upsert_code(&email, &code, expires_at)
            .await?;

        let body = format!(
            "Your townhall verification code is {}.\n\nIt expires in {} minutes.",
            code,
            self.settings.ttl.num_minutes().max(1)
        );
        self.sender
            .send(&email, "Your townhall verification code", &body)
            .await?;

        tracing::info!(email = %email, "Verification code issued");

        Ok(record)
    }

    /// Checks a submitted code and marks the email as verified on success.
    ///
    /// Verifying an already verified email succeeds without checking the code again.
    ///
    /// # Returns
    /// - `Ok(EmailVerification)` - Verified record
    /// - `Err(AppError::NotFound)` - No code was requested for this email
    /// - `Err(AppError::BadRequest)` - Code expired, attempt limit reached, or wrong code
    pub async fn verify_code(&self, email: &str, code: &str) -> Result<EmailVerification, AppError> {
        let email = normalize_email(email);
        let repo = EmailVerificationRepository::new(self.db);

        let mut record = repo.find_by_email(&email).await?.ok_or_else(|| {
            AppError::NotFound("No verification code was requested for this email".to_string())
        })?;

        if record.verified {
            return Ok(record);
        }
        if record.is_expired(Utc::now()) {
            return Err(AppError::BadRequest(
                "Verification code has expired".to_string(),
            ));
        }
        if record.attempts >= self.settings.max_attempts {
            return Err(AppError::BadRequest(
                "Too many attempts, request a new code".to_string(),
            ));
        }

        if record.code != code.trim() {
            if !repo
                .increment_attempts_below(record.id, self.settings.max_attempts)
                .await?
            {
                return Err(AppError::BadRequest(
                    "Too many attempts, request a new code".to_string(),
                ));
            }
            tracing::debug!(email = %email, "Wrong verification code");
            return Err(AppError::BadRequest("Invalid verification code".to_string()));
        }

        repo.mark_verified(record.id).await?;
        record.verified = true;

        Ok(record)
    }

    /// Deletes expired, unverified codes.
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        let deleted = EmailVerificationRepository::new(self.db)
            .delete_expired(Utc::now())
            .await?;

        if deleted > 0 {
            tracing::info!(deleted, "Purged expired verification codes");
        }

        Ok(deleted)
    }
}

fn generate_code() -> String {
    format!("{:06}", rand::rng().random_range(0..1_000_000u32))
}
