//! Admin-only user management: list accounts, change roles.
//!
//! Non-admin callers are redirected to the ticket list, the same benign
//! navigation every other denial resolves to. Unrecognized role strings are
//! rejected by the closed `Role` parser before any store mutation.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Form, Json, Router,
};

use helpdesk_auth::{ensure_may_manage_users, Role};
use helpdesk_core::UserId;

use crate::app::dto::{user_to_json, ChangeRoleForm, RoleForm};
use crate::app::{errors, services::AppServices};
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(change_role))
        .route("/:id/role", post(change_role_by_path))
}

/// GET /users - All accounts in registration order.
pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
) -> axum::response::Response {
    if ensure_may_manage_users(&current.actor()).is_err() {
        return errors::deny_to_ticket_list();
    }

    let users = services.identity.list();
    let items: Vec<_> = users.iter().map(user_to_json).collect();

    Json(serde_json::json!({
        "view": "users",
        "users": items,
    }))
    .into_response()
}

/// POST /users - Change a user's role (form carries the target user id).
pub async fn change_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    Form(body): Form<ChangeRoleForm>,
) -> axum::response::Response {
    apply_role_change(&services, &current, &body.user_id, &body.role)
}

/// POST /users/:id/role - Change a user's role (target id in the path).
pub async fn change_role_by_path(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    Form(body): Form<RoleForm>,
) -> axum::response::Response {
    apply_role_change(&services, &current, &id, &body.role)
}

fn apply_role_change(
    services: &AppServices,
    current: &CurrentUser,
    user_id: &str,
    role: &str,
) -> axum::response::Response {
    if ensure_may_manage_users(&current.actor()).is_err() {
        return errors::deny_to_ticket_list();
    }

    let Ok(user_id) = user_id.parse::<UserId>() else {
        return Redirect::to("/users").into_response();
    };

    let role = match role.parse::<Role>() {
        Ok(role) => role,
        Err(err) => {
            tracing::warn!(user_id = %user_id, error = %err, "role change rejected");
            return errors::redirect_with_notice("/users", "unknown_role");
        }
    };

    // Nonexistent ids are silently ignored by the store (stale admin form).
    services.identity.set_role(user_id, role);

    Redirect::to("/users").into_response()
}
