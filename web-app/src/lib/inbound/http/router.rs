use std::sync::Arc;
use std::time::Duration;

use auth::SessionCodec;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::endpoints::Endpoint;
use super::handlers::account::account;
use super::handlers::hello::hello;
use super::handlers::index::greeting;
use super::handlers::index::index;
use super::handlers::login::login;
use super::handlers::login::login_form;
use super::handlers::logout::logout;
use super::handlers::register::register;
use super::handlers::register::register_form;
use super::middleware::load_request_context;
use super::middleware::login_required;
use super::templates::Renderer;
use crate::outbound::database::Database;

#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub session_codec: Arc<SessionCodec>,
    pub renderer: Arc<dyn Renderer>,
    pub cookie_secure: bool,
}

pub fn create_router(
    database: Database,
    session_codec: Arc<SessionCodec>,
    renderer: Arc<dyn Renderer>,
    cookie_secure: bool,
) -> Router {
    let state = AppState {
        database,
        session_codec,
        renderer,
        cookie_secure,
    };

    let public_routes = Router::new()
        .route(Endpoint::Index.path(), get(index))
        .route(Endpoint::Greeting.path(), get(greeting))
        .route(Endpoint::Hello.path(), get(hello))
        .route(
            Endpoint::Register.path(),
            get(register_form).post(register),
        )
        .route(Endpoint::Login.path(), get(login_form).post(login))
        .route(Endpoint::Logout.path(), get(logout).post(logout));

    let protected_routes = Router::new()
        .route(Endpoint::Account.path(), get(account))
        .route_layer(middleware::from_fn(login_required));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            // Headers stay out of the span: the session cookie is a credential.
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            load_request_context,
        ))
        .layer(trace_layer)
        .with_state(state)
}
