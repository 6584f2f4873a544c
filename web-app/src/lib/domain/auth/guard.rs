use std::future::Future;

use crate::domain::session::models::RequestIdentity;
use crate::domain::user::models::User;

/// Outcome of a guarded operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    /// The request was authenticated and the operation ran.
    Ran(T),
    /// The request was anonymous; the operation did not run.
    LoginRequired,
}

/// Run `op` only for an authenticated request.
///
/// Anonymous requests short-circuit to [`Guarded::LoginRequired`] without
/// invoking `op`. Authenticated requests invoke it exactly once with the
/// signed-in user.
pub async fn require_authenticated<F, Fut, T>(identity: &RequestIdentity, op: F) -> Guarded<T>
where
    F: FnOnce(&User) -> Fut,
    Fut: Future<Output = T>,
{
    match identity.user() {
        Some(user) => Guarded::Ran(op(user).await),
        None => Guarded::LoginRequired,
    }
}
