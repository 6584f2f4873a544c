use thiserror::Error;

/// A required form field was missing or empty.
///
/// The message is shown to the user verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username is required.")]
    UsernameRequired,

    #[error("Password is required.")]
    PasswordRequired,
}

/// Top-level error for credential store operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid user record: {0}")]
    InvalidRecord(#[from] ValidationError),

    #[error("User {0} is already registered.")]
    DuplicateUsername(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for UserError {
    fn from(err: sqlx::Error) -> Self {
        UserError::DatabaseError(err.to_string())
    }
}
