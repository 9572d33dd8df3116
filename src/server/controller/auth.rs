use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        user::{LoginDto, RegisterDto, SendCodeDto, UserDto, VerificationStatusDto, VerifyCodeDto},
    },
    server::{
        error::AppError,
        middleware::{auth::AuthGuard, session::AuthSession},
        model::user::RegisterParams,
        service::{auth::AuthService, email_verification::EmailVerificationService},
        state::AppState,
    },
};

/// Tag for grouping authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Send an email verification code.
///
/// Issues a new 6-digit code for the address, replacing any previous one, and emails
/// it. Rate limited.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Code issued; the response never contains the code
/// - `400 Bad Request` - Invalid email or email already registered
#[utoipa::path(
    post,
    path = "/api/auth/email/send-code",
    tag = AUTH_TAG,
    request_body = SendCodeDto,
    responses(
        (status = 200, description = "Verification code sent", body = VerificationStatusDto),
        (status = 400, description = "Invalid or already registered email", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_code(
    State(state): State<AppState>,
    Json(payload): Json<SendCodeDto>,
) -> Result<impl IntoResponse, AppError> {
    let record = EmailVerificationService::new(
        &state.db,
        &state.email_sender,
        state.verification_settings(),
    )
    .send_code(&payload.email)
    .await?;

    Ok((StatusCode::OK, Json(record.into_dto())))
}

/// Verify an emailed code.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Email verified
/// - `400 Bad Request` - Wrong, expired or exhausted code
/// - `404 Not Found` - No code requested for this email
#[utoipa::path(
    post,
    path = "/api/auth/email/verify",
    tag = AUTH_TAG,
    request_body = VerifyCodeDto,
    responses(
        (status = 200, description = "Email verified", body = VerificationStatusDto),
        (status = 400, description = "Invalid, expired or exhausted code", body = ErrorDto),
        (status = 404, description = "No code requested for this email", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_code(
    State(state): State<AppState>,
    Json(payload): Json<VerifyCodeDto>,
) -> Result<impl IntoResponse, AppError> {
    let record = EmailVerificationService::new(
        &state.db,
        &state.email_sender,
        state.verification_settings(),
    )
    .verify_code(&payload.email, &payload.code)
    .await?;

    Ok((StatusCode::OK, Json(record.into_dto())))
}

/// Register a new account and log it in.
///
/// The email must have been verified first. The first account ever created becomes an
/// admin.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `201 Created` - Account created and session started
/// - `400 Bad Request` - Invalid fields or unverified email
/// - `409 Conflict` - Email or handle already taken
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Invalid fields or unverified email", body = ErrorDto),
        (status = 409, description = "Email or handle already taken", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(&state.db)
        .register(RegisterParams {
            email: payload.email,
            handle: payload.handle,
            password: payload.password,
        })
        .await?;

    AuthSession::new(&session).set_user_id(user.id).await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Log in with email and password.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Session started
/// - `401 Unauthorized` - Unknown email or wrong password
/// - `403 Forbidden` - Account suspended
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 403, description = "Account suspended", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(&state.db)
        .login(&payload.email, &payload.password)
        .await?;

    AuthSession::new(&session).set_user_id(user.id).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Log out and clear the session.
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Logged out")
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the currently logged in user.
///
/// # Returns
/// - `200 OK` - The session user
/// - `401 Unauthorized` - Not logged in
/// - `403 Forbidden` - Account suspended
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Account suspended", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
