use chrono::{Duration, Utc};
use test_utils::factory;

use super::builder;
use crate::server::{
    data::email_verification::EmailVerificationRepository,
    error::AppError,
    model::email_verification::VerificationSettings,
    service::{email::EmailSender, email_verification::EmailVerificationService},
};

mod send_code;
mod verify_code;

fn sender() -> EmailSender {
    EmailSender::new(None, "noreply@townhall.local").unwrap()
}
