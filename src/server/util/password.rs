//! Argon2id password hashing and credential validation rules.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};

use crate::server::error::{internal::InternalError, AppError};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MIN_HANDLE_LENGTH: usize = 3;
pub const MAX_HANDLE_LENGTH: usize = 30;

/// Hashes a password into a PHC string suitable for storage.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| InternalError::PasswordHash(e.to_string()))?
        .to_string();

    Ok(hash)
}

/// Checks a password against a stored PHC hash.
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        tracing::warn!("Stored password hash could not be parsed");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Requires at least 8 characters with at least one letter and one digit.
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    let long_enough = password.chars().count() >= MIN_PASSWORD_LENGTH;
    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if long_enough && has_letter && has_digit {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Password must be at least {} characters and contain a letter and a digit",
            MIN_PASSWORD_LENGTH
        )))
    }
}

/// Handles are 3 to 30 characters of lowercase ASCII letters, digits and underscores.
pub fn validate_handle(handle: &str) -> Result<(), AppError> {
    let valid_len = (MIN_HANDLE_LENGTH..=MAX_HANDLE_LENGTH).contains(&handle.len());
    let valid_chars = handle
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if valid_len && valid_chars {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Handle must be {}-{} characters of a-z, 0-9 or _",
            MIN_HANDLE_LENGTH, MAX_HANDLE_LENGTH
        )))
    }
}

/// Minimal structural email check; delivery confirms the rest.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("Invalid email address: {}", email)))
    }
}

/// Lowercases and trims an email so lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
