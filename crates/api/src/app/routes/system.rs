use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::context::CurrentUser;

/// GET /health - Liveness probe.
pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// GET / - Landing view for an authenticated session.
pub async fn home(Extension(current): Extension<CurrentUser>) -> impl IntoResponse {
    Json(serde_json::json!({
        "view": "home",
        "user_id": current.id(),
        "username": current.username(),
        "role": current.role().as_str(),
    }))
}
