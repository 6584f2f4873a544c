use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Extension;

use super::context::auth_gate;
use super::context::RequestContext;
use super::endpoints::Endpoint;
use super::handlers::ApiError;
use super::router::AppState;
use super::session::CookieSession;
use crate::domain::auth::guard::require_authenticated;
use crate::domain::auth::guard::Guarded;

/// Build the request context before routing and tear it down afterwards.
///
/// Resolves the session cookie into a `RequestIdentity`, opens a request
/// store scope, hands both to the handler through extensions, then releases
/// the store connection and writes the session cookie back if it changed.
pub async fn load_request_context(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = Arc::new(CookieSession::from_headers(
        req.headers(),
        &state.session_codec,
    ));
    let db = state.database.request_scope();

    let identity = auth_gate(&db).resolve_identity(session.as_ref()).await?;

    req.extensions_mut().insert(RequestContext {
        db: db.clone(),
        session: Arc::clone(&session),
        identity,
    });

    let mut response = next.run(req).await;

    if let Err(e) = db.close().await {
        tracing::warn!(error = %e, "Failed to close request connection");
    }

    let cookie = session
        .outgoing_cookie(&state.session_codec, state.cookie_secure)
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    if let Some(cookie) = cookie {
        let value = HeaderValue::from_str(&cookie.to_string())
            .map_err(|e| ApiError::InternalServerError(e.to_string()))?;
        response.headers_mut().append(SET_COOKIE, value);
    }

    Ok(response)
}

/// Only let authenticated requests through; send anonymous ones to login.
pub async fn login_required(
    Extension(ctx): Extension<RequestContext>,
    req: Request,
    next: Next,
) -> Response {
    require_authenticated(&ctx.identity, |_| next.run(req))
        .await
        .into_response()
}

impl IntoResponse for Guarded<Response> {
    fn into_response(self) -> Response {
        match self {
            Guarded::Ran(response) => response,
            Guarded::LoginRequired => Endpoint::Login.redirect().into_response(),
        }
    }
}
