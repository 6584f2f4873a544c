use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Port for the credential store.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Hash the password and persist a new user.
    ///
    /// # Arguments
    /// * `command` - Validated username and plaintext password
    ///
    /// # Returns
    /// Identifier assigned by the store
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `Hashing` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<UserId, UserError>;

    /// Look a user up by username. A miss is `Ok(None)`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Look a user up by identifier. A miss is `Ok(None)`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;

    /// Check `password` against the user's stored hash in constant time.
    fn verify_password(&self, user: &User, password: &Password) -> bool;

    /// Do the work of a password check for a username with no account.
    ///
    /// Keeps a lookup miss as slow as a wrong password.
    fn reject_unknown_user(&self, password: &Password);
}

/// Persistence operations for users.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert a user row.
    ///
    /// # Errors
    /// * `DuplicateUsername` - Unique constraint on username rejected the row
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, username: &Username, password_hash: &str)
        -> Result<UserId, UserError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
}
