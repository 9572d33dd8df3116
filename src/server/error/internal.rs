use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to hash a password with argon2.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),

    /// A row that was just written could not be read back.
    ///
    /// Occurs when an insert or update succeeds but the follow-up query finds
    /// no matching active row.
    #[error("{entity} {id} missing after write")]
    MissingAfterWrite {
        /// Entity kind, e.g. "post"
        entity: &'static str,
        /// Primary key of the row
        id: i32,
    },

    /// Failure to build an outgoing email message.
    #[error("Failed to build email: {0}")]
    EmailBuild(String),
}
