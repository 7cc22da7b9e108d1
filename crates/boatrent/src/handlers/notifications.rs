use axum::{extract::State, Json};
use boatrent_auth::CurrentUser;
use uuid::Uuid;

use boatrent_core::rental::Notification;

use crate::error::{ApiError, ApiPath};
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    Ok(Json(
        state.notifications.list_notifications_by_user(user.id).await?,
    ))
}

/// PATCH /api/notifications/{id}/read
///
/// Someone else's notification is reported as missing.
pub async fn mark_notification_read(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Notification>, ApiError> {
    let owned = state
        .notifications
        .list_notifications_by_user(user.id)
        .await?
        .into_iter()
        .any(|n| n.id == id);
    if !owned {
        return Err(ApiError::not_found("Notificación no encontrada"));
    }

    Ok(Json(state.notifications.mark_notification_read(id).await?))
}
