//! Login, logout, and registration.
//!
//! Login failure and duplicate registration both redisplay their view with a
//! `notice` query parameter; success always navigates away with a redirect.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Redirect},
    Form, Json,
};

use helpdesk_identity::IdentityError;

use crate::app::dto::{CredentialsForm, NoticeQuery};
use crate::app::{errors, services::AppServices};
use crate::middleware::{clear_session_cookie, session_cookie};

/// GET /login - Credential form view.
pub async fn login_view(Query(query): Query<NoticeQuery>) -> axum::response::Response {
    Json(serde_json::json!({
        "view": "login",
        "notice": query.notice,
    }))
    .into_response()
}

/// POST /login - Authenticate and open a session.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Form(body): Form<CredentialsForm>,
) -> axum::response::Response {
    let user = match services
        .identity
        .authenticate(&body.username, &body.password, services.verifier.as_ref())
    {
        Ok(user) => user,
        Err(_) => {
            tracing::warn!(username = %body.username, "login failed");
            return errors::redirect_with_notice("/login", "invalid_credentials");
        }
    };

    let token = services.sessions.issue(user.id);
    tracing::info!(user_id = %user.id, "session opened");

    (
        AppendHeaders([(SET_COOKIE, session_cookie(&token))]),
        Redirect::to("/"),
    )
        .into_response()
}

/// GET /logout - Close the session and return to the login view.
pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(token): Extension<helpdesk_auth::SessionToken>,
) -> axum::response::Response {
    services.sessions.revoke(&token);
    tracing::info!("session closed");

    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Redirect::to("/login"),
    )
        .into_response()
}

/// GET /register - Registration form view.
pub async fn register_view(Query(query): Query<NoticeQuery>) -> axum::response::Response {
    Json(serde_json::json!({
        "view": "register",
        "notice": query.notice,
    }))
    .into_response()
}

/// POST /register - Create a `user`-role account.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Form(body): Form<CredentialsForm>,
) -> axum::response::Response {
    match services.identity.register(&body.username, &body.password) {
        Ok(_) => Redirect::to("/login").into_response(),
        Err(IdentityError::DuplicateUsername(name)) => {
            tracing::warn!(username = %name, "registration rejected: duplicate username");
            errors::redirect_with_notice("/register", "duplicate_username")
        }
        Err(err) => {
            tracing::warn!(error = %err, "registration rejected");
            errors::redirect_with_notice("/register", "invalid_input")
        }
    }
}
