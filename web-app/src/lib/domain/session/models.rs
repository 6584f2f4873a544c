use crate::domain::user::models::User;

/// Who is making the current request.
///
/// Resolved once per request from the session before any handler runs and
/// discarded with the request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestIdentity {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl RequestIdentity {
    pub fn user(&self) -> Option<&User> {
        match self {
            RequestIdentity::Anonymous => None,
            RequestIdentity::Authenticated(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }
}

impl From<Option<User>> for RequestIdentity {
    fn from(user: Option<User>) -> Self {
        user.map_or(RequestIdentity::Anonymous, RequestIdentity::Authenticated)
    }
}
