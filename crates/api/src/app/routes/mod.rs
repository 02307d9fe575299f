use axum::{routing::get, Router};

pub mod auth;
pub mod system;
pub mod tickets;
pub mod users;

/// Routes reachable without a session.
pub fn public_router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/login", get(auth::login_view).post(auth::login))
        .route("/register", get(auth::register_view).post(auth::register))
}

/// Routes behind the session middleware.
pub fn protected_router() -> Router {
    Router::new()
        .route("/", get(system::home))
        .route("/logout", get(auth::logout))
        .nest("/tickets", tickets::router())
        .nest("/users", users::router())
}
