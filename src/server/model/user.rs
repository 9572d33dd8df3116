//! User domain models and parameters.
//!
//! Provides domain models for registered accounts with their permission and moderation
//! state, plus parameter types for registration and admin updates.

use chrono::{DateTime, Utc};

use crate::{
    model::user::{PaginatedUsersDto, UserDto},
    server::model::pagination::Paginated,
};

/// Moderation state of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Suspended,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
        }
    }

    /// Parses the API/database representation.
    ///
    /// # Returns
    /// - `Some(UserStatus)` - For `"active"` or `"suspended"`
    /// - `None` - For any other value
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "suspended" => Some(Self::Suspended),
            _ => None,
        }
    }
}

/// Registered user with credentials, permissions and moderation state.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    /// Normalized (lowercase) email address.
    pub email: String,
    pub handle: String,
    /// Argon2 PHC string. Never leaves the server.
    pub password_hash: String,
    pub admin: bool,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts the user domain model to a DTO for API responses.
    ///
    /// The password hash is dropped.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            handle: self.handle,
            admin: self.admin,
            status: self.status.as_str().to_string(),
            created_at: self.created_at,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// Unknown stored status values map to `Suspended`.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            handle: entity.handle,
            password_hash: entity.password_hash,
            admin: entity.admin,
            status: UserStatus::parse(&entity.status).unwrap_or(UserStatus::Suspended),
            created_at: entity.created_at,
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.status == UserStatus::Suspended
    }
}

/// Parameters for inserting a new user.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub email: String,
    pub handle: String,
    pub password_hash: String,
    pub admin: bool,
}

/// Parameters for registering through the auth service.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    pub email: String,
    pub handle: String,
    pub password: String,
}

/// Parameters for setting user admin status.
#[derive(Debug, Clone)]
pub struct SetAdminParam {
    pub user_id: i32,
    pub is_admin: bool,
}

/// Parameters for suspending or reactivating a user.
#[derive(Debug, Clone)]
pub struct SetStatusParam {
    pub user_id: i32,
    pub status: UserStatus,
}

impl Paginated<User> {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            users: self.items.into_iter().map(User::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
