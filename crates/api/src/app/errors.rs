//! Redirect mapping for domain failures.
//!
//! Boundary policy: every failure resolves to an ordinary navigational
//! redirect, never a 403/404. In particular a denied ticket access and a
//! missing ticket both land on the list view, so denial is observably
//! indistinguishable from "not found".

use axum::response::{IntoResponse, Redirect, Response};

/// Redirect used for every denial and every missing ticket.
pub fn deny_to_ticket_list() -> Response {
    Redirect::to("/tickets").into_response()
}

/// Redirect to a view with a human-readable `notice` query parameter.
pub fn redirect_with_notice(path: &str, notice: &str) -> Response {
    Redirect::to(&format!("{path}?notice={notice}")).into_response()
}
