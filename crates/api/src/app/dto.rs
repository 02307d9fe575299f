//! Form DTOs and JSON view mapping.
//!
//! There is no HTML templating layer; view GETs answer with the JSON the
//! templates would have been fed.

use serde::Deserialize;

use helpdesk_identity::User;
use helpdesk_tickets::Ticket;

// ─────────────────────────────────────────────────────────────────────────────
// Form DTOs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTicketForm {
    pub title: String,
    pub description: String,
}

/// Partial-update form: absent fields leave the stored value untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateTicketForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Role-change form posted to the user-management view.
#[derive(Debug, Deserialize)]
pub struct ChangeRoleForm {
    pub user_id: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON view mapping
// ─────────────────────────────────────────────────────────────────────────────

pub fn ticket_to_json(ticket: &Ticket) -> serde_json::Value {
    serde_json::json!({
        "id": ticket.id,
        "title": ticket.title,
        "description": ticket.description,
        "status": ticket.status,
        "owner": ticket.owner,
        "created_at": ticket.created_at.to_rfc3339(),
    })
}

pub fn user_to_json(user: &User) -> serde_json::Value {
    serde_json::json!({
        "id": user.id,
        "username": user.username,
        "role": user.role.as_str(),
        "created_at": user.created_at.to_rfc3339(),
    })
}
