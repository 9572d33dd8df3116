//! Email verification code records.

use chrono::{DateTime, Duration, Utc};

use crate::model::user::VerificationStatusDto;

/// Code lifetime and attempt limit for email verification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerificationSettings {
    pub ttl: Duration,
    pub max_attempts: i32,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::seconds(300),
            max_attempts: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailVerification {
    pub id: i32,
    pub email: String,
    /// 6-digit numeric code.
    pub code: String,
    pub expires_at: DateTime<Utc>,
    /// Failed verification attempts since the code was issued.
    pub attempts: i32,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl EmailVerification {
    pub fn from_entity(entity: entity::email_verification::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            code: entity.code,
            expires_at: entity.expires_at,
            attempts: entity.attempts,
            verified: entity.verified,
            created_at: entity.created_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn into_dto(self) -> VerificationStatusDto {
        VerificationStatusDto {
            email: self.email,
            verified: self.verified,
            expires_at: Some(self.expires_at),
        }
    }
}
