use crate::domain::user::models::Password;
use crate::domain::user::models::Username;
use crate::user::errors::ValidationError;

/// Username and password submitted through the register or login form.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: Username,
    pub password: Password,
}

impl Credentials {
    /// Validate raw form input.
    ///
    /// The username is checked before the password so that the first missing
    /// field is the one reported.
    ///
    /// # Errors
    /// * `UsernameRequired` - Username is empty
    /// * `PasswordRequired` - Password is empty
    pub fn parse(username: String, password: String) -> Result<Self, ValidationError> {
        let username = Username::new(username)?;
        let password = Password::new(password)?;
        Ok(Self { username, password })
    }
}
