use std::sync::Arc;

use serde_json::json;
use serde_json::Value;

use super::session::CookieSession;
use super::templates::Page;
use crate::domain::auth::service::AuthGate;
use crate::domain::session::models::RequestIdentity;
use crate::domain::user::service::UserService;
use crate::outbound::database::RequestDb;
use crate::outbound::repositories::SqliteUserRepository;

/// Per-request state, inserted into request extensions before routing.
///
/// Everything here lives exactly as long as one request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub db: RequestDb,
    pub session: Arc<CookieSession>,
    pub identity: RequestIdentity,
}

impl RequestContext {
    /// Auth gate bound to this request's store connection.
    pub fn auth_gate(&self) -> AuthGate<UserService<SqliteUserRepository>> {
        auth_gate(&self.db)
    }

    /// Start a page with the current user already in its context.
    pub fn page(&self, template: &'static str) -> Page {
        Page::new(template).with("user", self.user_value())
    }

    fn user_value(&self) -> Value {
        match self.identity.user() {
            Some(user) => json!({ "id": user.id.0, "username": user.username.as_str() }),
            None => Value::Null,
        }
    }
}

pub(crate) fn auth_gate(db: &RequestDb) -> AuthGate<UserService<SqliteUserRepository>> {
    let repository = Arc::new(SqliteUserRepository::new(db.clone()));
    AuthGate::new(Arc::new(UserService::new(repository)))
}
