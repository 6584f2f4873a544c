use axum::response::Redirect;
use axum::Extension;

use crate::inbound::http::context::RequestContext;
use crate::inbound::http::endpoints::Endpoint;

pub async fn logout(Extension(ctx): Extension<RequestContext>) -> Redirect {
    ctx.auth_gate().logout(ctx.session.as_ref());
    Endpoint::Index.redirect()
}
