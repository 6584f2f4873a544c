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

const TEMPLATE: &str = "auth/login";

pub async fn login_form(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response, ApiError> {
    ctx.page(TEMPLATE).render(state.renderer.as_ref())
}

pub async fn login(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, ApiError> {
    let result = ctx
        .auth_gate()
        .login(ctx.session.as_ref(), form.username, form.password)
        .await;

    match result {
        Ok(_) => Ok(Endpoint::Index.redirect().into_response()),
        Err(e) => render_auth_error(&ctx, &state, TEMPLATE, e),
    }
}
