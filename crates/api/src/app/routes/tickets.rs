//! Ticket CRUD, gated by the ownership rules.
//!
//! Denial policy: a denied access and a missing ticket both redirect to the
//! list view. Handlers therefore resolve the target first and run the rule
//! second, but a caller cannot tell which of the two failed.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Form, Json, Router,
};

use helpdesk_auth::{
    ensure_may_delete_ticket, ensure_may_edit_ticket, ensure_may_view_ticket, may_change_status,
};
use helpdesk_core::TicketId;
use helpdesk_tickets::TicketPatch;

use crate::app::dto::{ticket_to_json, CreateTicketForm, UpdateTicketForm};
use crate::app::{errors, services::AppServices};
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_tickets))
        .route("/create", get(create_view).post(create_ticket))
        .route("/:id", get(view_ticket))
        .route("/:id/edit", get(edit_view).post(update_ticket))
        // Documented alias for the edit action.
        .route("/:id/update", post(update_ticket))
        .route("/:id/delete", post(delete_ticket))
}

/// GET /tickets - Tickets visible to the caller, in creation order.
pub async fn list_tickets(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
) -> axum::response::Response {
    let tickets = services.tickets.list_for(&current.actor());
    let items: Vec<_> = tickets.iter().map(ticket_to_json).collect();

    Json(serde_json::json!({
        "view": "tickets",
        "tickets": items,
    }))
    .into_response()
}

/// GET /tickets/:id - Detail view; not-found and denied are the same redirect.
pub async fn view_ticket(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<TicketId>() else {
        return errors::deny_to_ticket_list();
    };

    let Some(ticket) = services.tickets.get(id) else {
        return errors::deny_to_ticket_list();
    };

    if ensure_may_view_ticket(&current.actor(), ticket.owner).is_err() {
        return errors::deny_to_ticket_list();
    }

    Json(serde_json::json!({
        "view": "ticket",
        "ticket": ticket_to_json(&ticket),
    }))
    .into_response()
}

/// GET /tickets/create - Creation form view.
pub async fn create_view(Extension(current): Extension<CurrentUser>) -> axum::response::Response {
    Json(serde_json::json!({
        "view": "create_ticket",
        "username": current.username(),
    }))
    .into_response()
}

/// POST /tickets/create - Create a ticket owned by the caller.
pub async fn create_ticket(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    Form(body): Form<CreateTicketForm>,
) -> axum::response::Response {
    services
        .tickets
        .create(current.id(), &body.title, &body.description);

    Redirect::to("/tickets").into_response()
}

/// GET /tickets/:id/edit - Edit form view, gated like the detail view.
pub async fn edit_view(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<TicketId>() else {
        return errors::deny_to_ticket_list();
    };

    let Some(ticket) = services.tickets.get(id) else {
        return errors::deny_to_ticket_list();
    };

    if ensure_may_edit_ticket(&current.actor(), ticket.owner).is_err() {
        return errors::deny_to_ticket_list();
    }

    Json(serde_json::json!({
        "view": "update_ticket",
        "ticket": ticket_to_json(&ticket),
        "may_change_status": may_change_status(&current.actor()),
    }))
    .into_response()
}

/// POST /tickets/:id/edit (and /:id/update) - Partial update.
///
/// The status field is admin-only; for other editors it is dropped from the
/// patch while title/description still apply.
pub async fn update_ticket(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    Form(body): Form<UpdateTicketForm>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<TicketId>() else {
        return errors::deny_to_ticket_list();
    };

    let Some(ticket) = services.tickets.get(id) else {
        return errors::deny_to_ticket_list();
    };

    if ensure_may_edit_ticket(&current.actor(), ticket.owner).is_err() {
        return errors::deny_to_ticket_list();
    }

    let mut patch = TicketPatch {
        title: body.title,
        description: body.description,
        status: body.status,
    };

    if patch.status.is_some() && !may_change_status(&current.actor()) {
        tracing::debug!(ticket_id = %id, "status change dropped: caller is not admin");
        patch = patch.without_status();
    }

    // The ticket was just resolved; a racing delete still only yields the
    // benign not-found redirect.
    if services.tickets.update(id, patch).is_err() {
        return errors::deny_to_ticket_list();
    }

    Redirect::to("/tickets").into_response()
}

/// POST /tickets/:id/delete - Remove a ticket.
pub async fn delete_ticket(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<TicketId>() else {
        return errors::deny_to_ticket_list();
    };

    let Some(ticket) = services.tickets.get(id) else {
        return errors::deny_to_ticket_list();
    };

    if ensure_may_delete_ticket(&current.actor(), ticket.owner).is_err() {
        return errors::deny_to_ticket_list();
    }

    // Failure here means a concurrent delete won; same benign outcome.
    let _ = services.tickets.delete(id);

    Redirect::to("/tickets").into_response()
}
