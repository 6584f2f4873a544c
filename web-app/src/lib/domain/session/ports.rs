use crate::domain::user::models::UserId;

/// Session state of the current request.
///
/// Implementations are scoped to one request and shared between the code that
/// loads the session and the handler, hence `&self` with interior mutability.
/// The session holds at most one value and is never partially updated.
pub trait SessionManager: Send + Sync {
    /// The authenticated user's id, or `None` for an anonymous session.
    ///
    /// A missing, malformed or forged token reads as `None`, never as an error.
    fn current_user_id(&self) -> Option<UserId>;

    /// Replace the whole session with exactly this user id.
    fn set_current_user_id(&self, id: UserId);

    /// Drop all session state.
    fn clear(&self);
}
