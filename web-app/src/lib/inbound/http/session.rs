use std::sync::Mutex;
use std::sync::PoisonError;

use auth::SessionCodec;
use auth::TokenError;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;

use crate::domain::session::ports::SessionManager;
use crate::domain::user::models::UserId;

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Default)]
struct SessionState {
    user_id: Option<UserId>,
    modified: bool,
}

/// Session of one request, round-tripped through a signed cookie.
///
/// Loaded from the request's `Cookie` header and, if modified while handling
/// the request, written back as a `Set-Cookie` on the response.
#[derive(Debug, Default)]
pub struct CookieSession {
    state: Mutex<SessionState>,
}

impl CookieSession {
    /// Read the session from request headers.
    ///
    /// A missing, malformed, forged or expired token yields an empty session.
    pub fn from_headers(headers: &HeaderMap, codec: &SessionCodec) -> Self {
        let jar = CookieJar::from_headers(headers);

        let user_id = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| match codec.open(cookie.value()) {
                Ok(claims) => Some(UserId(claims.user_id)),
                Err(e) => {
                    tracing::debug!(error = %e, "Ignoring unusable session cookie");
                    None
                }
            });

        Self {
            state: Mutex::new(SessionState {
                user_id,
                modified: false,
            }),
        }
    }

    pub fn is_modified(&self) -> bool {
        self.lock().modified
    }

    /// Cookie to send back, if the session changed during the request.
    ///
    /// A populated session gets a freshly signed token; an emptied one gets a
    /// removal cookie.
    ///
    /// # Errors
    /// * `SigningFailed` - Token signing failed
    pub fn outgoing_cookie(
        &self,
        codec: &SessionCodec,
        secure: bool,
    ) -> Result<Option<Cookie<'static>>, TokenError> {
        let state = self.lock();
        if !state.modified {
            return Ok(None);
        }

        let value = match state.user_id {
            Some(id) => codec.issue(id.0)?,
            None => String::new(),
        };

        let mut cookie = Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(secure)
            .build();

        if state.user_id.is_none() {
            cookie.make_removal();
        }

        Ok(Some(cookie))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionManager for CookieSession {
    fn current_user_id(&self) -> Option<UserId> {
        self.lock().user_id
    }

    fn set_current_user_id(&self, id: UserId) {
        let mut state = self.lock();
        state.user_id = Some(id);
        state.modified = true;
    }

    fn clear(&self) {
        let mut state = self.lock();
        state.user_id = None;
        state.modified = true;
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header::COOKIE;
    use axum::http::HeaderValue;

    use super::*;

    fn codec() -> SessionCodec {
        SessionCodec::new(b"test-secret-key-for-session-signing-32b", 24)
    }

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE, value)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_no_cookie_is_anonymous() {
        let session = CookieSession::from_headers(&HeaderMap::new(), &codec());
        assert_eq!(session.current_user_id(), None);
        assert!(!session.is_modified());
    }

    #[test]
    fn test_valid_cookie_round_trips_user_id() {
        let codec = codec();
        let token = codec.issue(9).unwrap();

        let session = CookieSession::from_headers(&headers_with_cookie(&token), &codec);
        assert_eq!(session.current_user_id(), Some(UserId(9)));
    }

    #[test]
    fn test_forged_cookie_is_anonymous() {
        let forger = SessionCodec::new(b"attacker-chosen-secret-of-32-bytes!!", 24);
        let token = forger.issue(1).unwrap();

        let session = CookieSession::from_headers(&headers_with_cookie(&token), &codec());
        assert_eq!(session.current_user_id(), None);
    }

    #[test]
    fn test_garbage_cookie_is_anonymous() {
        let session = CookieSession::from_headers(&headers_with_cookie("garbage"), &codec());
        assert_eq!(session.current_user_id(), None);
    }

    #[test]
    fn test_unmodified_session_sends_no_cookie() {
        let codec = codec();
        let token = codec.issue(9).unwrap();
        let session = CookieSession::from_headers(&headers_with_cookie(&token), &codec);

        assert!(session.outgoing_cookie(&codec, false).unwrap().is_none());
    }

    #[test]
    fn test_set_issues_signed_cookie() {
        let codec = codec();
        let session = CookieSession::default();

        session.set_current_user_id(UserId(3));
        let cookie = session.outgoing_cookie(&codec, true).unwrap().unwrap();

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(codec.open(cookie.value()).unwrap().user_id, 3);
    }

    #[test]
    fn test_clear_issues_removal_cookie() {
        let codec = codec();
        let token = codec.issue(9).unwrap();
        let session = CookieSession::from_headers(&headers_with_cookie(&token), &codec);

        session.clear();
        let cookie = session.outgoing_cookie(&codec, false).unwrap().unwrap();

        assert_eq!(session.current_user_id(), None);
        assert_eq!(cookie.value(), "");
        assert!(cookie.max_age().is_some_and(|age| age.is_zero()));
    }
}
