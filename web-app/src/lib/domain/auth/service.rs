use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Credentials;
use crate::domain::session::models::RequestIdentity;
use crate::domain::session::ports::SessionManager;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::ports::CredentialStore;

/// Register, login, logout and identity resolution over a credential store.
///
/// Session state is passed in per call; the gate itself holds nothing that
/// outlives a request beyond the store handle.
pub struct AuthGate<CS>
where
    CS: CredentialStore,
{
    credentials: Arc<CS>,
}

impl<CS> AuthGate<CS>
where
    CS: CredentialStore,
{
    pub fn new(credentials: Arc<CS>) -> Self {
        Self { credentials }
    }

    /// Create an account. The session is left untouched; the caller still
    /// has to log in.
    ///
    /// # Errors
    /// * `Validation` - Username or password missing (checked before any store access)
    /// * `DuplicateUsername` - Username is already taken
    /// * `StorageUnavailable` - Store failed
    pub async fn register(&self, username: String, password: String) -> Result<UserId, AuthError> {
        let credentials = Credentials::parse(username, password)?;

        let id = self
            .credentials
            .create_user(CreateUserCommand::new(
                credentials.username,
                credentials.password,
            ))
            .await?;

        Ok(id)
    }

    /// Verify credentials and bind the session to the user.
    ///
    /// Unknown usernames and wrong passwords fail identically, and a failed
    /// login leaves the session exactly as it was.
    ///
    /// # Errors
    /// * `Validation` - Username or password missing
    /// * `InvalidCredentials` - No such user or wrong password
    /// * `StorageUnavailable` - Store failed
    pub async fn login(
        &self,
        session: &dyn SessionManager,
        username: String,
        password: String,
    ) -> Result<User, AuthError> {
        let credentials = Credentials::parse(username, password)?;

        let verified = match self
            .credentials
            .find_by_username(&credentials.username)
            .await?
        {
            Some(user) => self
                .credentials
                .verify_password(&user, &credentials.password)
                .then_some(user),
            None => {
                self.credentials.reject_unknown_user(&credentials.password);
                None
            }
        };

        let Some(user) = verified else {
            tracing::info!(username = %credentials.username, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        session.clear();
        session.set_current_user_id(user.id);
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(user)
    }

    /// End the session, whatever its state.
    pub fn logout(&self, session: &dyn SessionManager) {
        if let Some(id) = session.current_user_id() {
            tracing::info!(user_id = %id, "User logged out");
        }
        session.clear();
    }

    /// Resolve the session into the identity of the current request.
    ///
    /// An anonymous session does not touch the store. A session naming a
    /// user that no longer exists resolves to `Anonymous`.
    ///
    /// # Errors
    /// * `StorageUnavailable` - Store failed
    pub async fn resolve_identity(
        &self,
        session: &dyn SessionManager,
    ) -> Result<RequestIdentity, AuthError> {
        let Some(id) = session.current_user_id() else {
            return Ok(RequestIdentity::Anonymous);
        };

        let user = self.credentials.find_by_id(id).await?;
        if user.is_none() {
            tracing::debug!(user_id = %id, "Session names an unknown user");
        }

        Ok(RequestIdentity::from(user))
    }
}
