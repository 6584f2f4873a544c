use axum::extract::State;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Extension;

use super::ApiError;
use crate::inbound::http::context::RequestContext;
use crate::inbound::http::endpoints::Endpoint;
use crate::inbound::http::router::AppState;

/// Signed-in user's account page. Mounted behind `login_required`.
pub async fn account(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response, ApiError> {
    let Some(user) = ctx.identity.user() else {
        return Ok(Endpoint::Login.redirect().into_response());
    };

    ctx.page("account")
        .with("id", user.id.0)
        .with("username", user.username.as_str())
        .render(state.renderer.as_ref())
}
