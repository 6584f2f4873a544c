use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::CredentialStore;
use crate::user::ports::UserRepository;

/// Credential store backed by a user repository.
///
/// Owns password hashing so that plaintext never crosses into persistence.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> CredentialStore for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<UserId, UserError> {
        let password_hash = self
            .password_hasher
            .hash(command.password.expose())
            .map_err(|e| UserError::Hashing(e.to_string()))?;

        let id = self
            .repository
            .create(&command.username, &password_hash)
            .await?;

        tracing::info!(user_id = %id, username = %command.username, "User created");

        Ok(id)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        self.repository.find_by_username(username).await
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        self.repository.find_by_id(id).await
    }

    fn verify_password(&self, user: &User, password: &Password) -> bool {
        match self
            .password_hasher
            .verify(password.expose(), &user.password_hash)
        {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Stored password hash is unusable");
                false
            }
        }
    }

    fn reject_unknown_user(&self, password: &Password) {
        self.password_hasher.verify_decoy(password.expose());
    }
}
