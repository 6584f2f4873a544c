pub mod context;
pub mod endpoints;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod session;
pub mod templates;
