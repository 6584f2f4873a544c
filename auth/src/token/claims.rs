use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Payload of a session token.
///
/// `user_id` is the only field with meaning to the application; `iat` and
/// `exp` bound the token's validity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: i64,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    /// Claims for `user_id`, issued now and valid for `lifetime_hours`.
    pub fn for_user(user_id: i64, lifetime_hours: i64) -> Self {
        let now = Utc::now();

        Self {
            user_id,
            iat: now.timestamp(),
            exp: (now + Duration::hours(lifetime_hours)).timestamp(),
        }
    }
}
