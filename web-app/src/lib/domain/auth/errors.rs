use thiserror::Error;

use crate::user::errors::UserError;
use crate::user::errors::ValidationError;

/// Failures of the register/login flow.
///
/// Every variant except `StorageUnavailable` and `Internal` is recovered
/// locally and shown to the user as its `Display` text.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("User {0} is already registered.")]
    DuplicateUsername(String),

    #[error("Incorrect username or password.")]
    InvalidCredentials,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Whether the message may be shown to the user and the form re-rendered.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AuthError::Validation(_) | AuthError::DuplicateUsername(_) | AuthError::InvalidCredentials
        )
    }
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateUsername(username) => AuthError::DuplicateUsername(username),
            UserError::DatabaseError(msg) => AuthError::StorageUnavailable(msg),
            UserError::InvalidRecord(e) => AuthError::Internal(e.to_string()),
            UserError::Hashing(msg) => AuthError::Internal(msg),
        }
    }
}
