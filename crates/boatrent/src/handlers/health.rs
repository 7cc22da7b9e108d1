//! Health check endpoints.
//!
//! - `/livez` - Liveness probe (immediate 200, no checks)
//! - `/healthz` - Storage round trip

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Looks up a user that cannot exist to prove storage answers.
///
/// Returns 503 when the backend errors.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Response {
    match state.users.get_user(Uuid::nil()).await {
        Ok(_) => (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Storage health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "unavailable",
                    "error": "El almacenamiento no responde"
                })),
            )
                .into_response()
        }
    }
}
