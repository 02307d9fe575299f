use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use helpdesk_auth::SessionToken;
use helpdesk_identity::IdentityStore;

use crate::app::services::SessionStore;
use crate::context::CurrentUser;

/// Name of the session cookie issued at login.
pub const SESSION_COOKIE: &str = "helpdesk_session";

#[derive(Clone)]
pub struct SessionState {
    pub sessions: Arc<SessionStore>,
    pub identity: Arc<IdentityStore>,
}

/// Resolve the session cookie to an authenticated user.
///
/// Any route behind this layer either runs with a `CurrentUser` (and the
/// resolved `SessionToken`) in its extensions, or the caller is redirected
/// to the login view. The user is re-read from the store on every request
/// so role changes take effect immediately.
pub async fn session_middleware(
    State(state): State<SessionState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let resolved = extract_session_cookie(req.headers())
        .and_then(|raw| raw.parse::<SessionToken>().ok())
        .and_then(|token| state.sessions.resolve(&token).map(|uid| (token, uid)))
        .and_then(|(token, uid)| state.identity.find_by_id(uid).map(|user| (token, user)));

    let Some((token, user)) = resolved else {
        return Redirect::to("/login").into_response();
    };

    req.extensions_mut().insert(token);
    req.extensions_mut().insert(CurrentUser::from(user));

    next.run(req).await
}

/// Pull the raw session token out of the `Cookie` header, if present.
fn extract_session_cookie(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;

    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then_some(value)
    })
}

/// `Set-Cookie` value binding the session token to the browser.
pub fn session_cookie(token: &SessionToken) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly")
}

/// `Set-Cookie` value that expires the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0")
}
