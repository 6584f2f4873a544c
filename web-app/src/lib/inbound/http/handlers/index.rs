use axum::extract::Query;
use axum::extract::State;
use axum::response::Response;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use crate::inbound::http::context::RequestContext;
use crate::inbound::http::router::AppState;

pub async fn index(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response, ApiError> {
    ctx.page("index").render(state.renderer.as_ref())
}

#[derive(Debug, Default, Deserialize)]
pub struct GreetingQuery {
    pub name: Option<String>,
}

/// Greets whoever `?name=` names; `name` is null when the parameter is absent.
pub async fn greeting(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Query(query): Query<GreetingQuery>,
) -> Result<Response, ApiError> {
    ctx.page("greeting")
        .with("title", "Welcome")
        .with("name", query.name)
        .render(state.renderer.as_ref())
}
