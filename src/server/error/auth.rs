use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user id is stored in the session.
    ///
    /// The request requires a logged in user. Results in a 401 Unauthorized response.
    #[error("User not found in session")]
    UserNotInSession,

    /// The session references a user id that no longer exists.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(i32),

    /// Email and password did not match a user.
    ///
    /// The same error is returned for unknown emails and wrong passwords so the
    /// response does not reveal which accounts exist.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The user lacks the permission required for the operation.
    ///
    /// Results in a 403 Forbidden response.
    ///
    /// # Fields
    /// - ID of the user that was denied
    /// - Reason logged server-side
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// The user account is suspended.
    ///
    /// Results in a 403 Forbidden response.
    #[error("User {0} is suspended")]
    UserSuspended(i32),

    /// Registration attempted for an email without a verified code.
    ///
    /// Results in a 400 Bad Request response.
    #[error("Email address has not been verified")]
    EmailNotVerified,
}

/// Converts authentication errors into HTTP responses.
///
/// Maps authentication errors to appropriate HTTP status codes and user-friendly error messages:
/// - `UserNotInSession` / `UserNotInDatabase` → 401 Unauthorized with "Not logged in"
/// - `InvalidCredentials` → 401 Unauthorized with "Invalid email or password"
/// - `AccessDenied` → 403 Forbidden with "Insufficient permissions"
/// - `UserSuspended` → 403 Forbidden with "Account suspended"
/// - `EmailNotVerified` → 400 Bad Request
///
/// Denials are logged at debug level with the internal reason while keeping client-facing
/// messages generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Not logged in")
            }
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid email or password"),
            Self::AccessDenied(_, _) => (StatusCode::FORBIDDEN, "Insufficient permissions"),
            Self::UserSuspended(_) => (StatusCode::FORBIDDEN, "Account suspended"),
            Self::EmailNotVerified => (StatusCode::BAD_REQUEST, "Email address has not been verified"),
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
