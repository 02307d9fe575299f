//! HTTP application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: owned store objects and the session store
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: form DTOs and JSON view mapping
//! - `errors.rs`: redirect mapping for domain failures

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    let session_state = middleware::SessionState {
        sessions: services.sessions.clone(),
        identity: services.identity.clone(),
    };

    // Protected routes: anything without a valid session is redirected to
    // the login view by the middleware.
    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        session_state,
        middleware::session_middleware,
    ));

    Router::new()
        .merge(routes::public_router())
        .merge(protected)
        .layer(Extension(services))
        .layer(ServiceBuilder::new())
}
