use axum::extract::State;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Extension;
use axum::Form;

use super::render_auth_error;
use super::ApiError;
use super::CredentialsForm;
use crate::inbound::http::context::RequestContext;
use crate::inbound::http::endpoints::Endpoint;
use crate::inbound::http::router::AppState;

const TEMPLATE: &str = "auth/register";

pub async fn register_form(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response, ApiError> {
    ctx.page(TEMPLATE).render(state.renderer.as_ref())
}

/// Create the account and send the user on to log in.
pub async fn register(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, ApiError> {
    match ctx.auth_gate().register(form.username, form.password).await {
        Ok(_) => Ok(Endpoint::Login.redirect().into_response()),
        Err(e) => render_auth_error(&ctx, &state, TEMPLATE, e),
    }
}
