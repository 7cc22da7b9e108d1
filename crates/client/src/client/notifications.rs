//! Notification API operations.

use super::BoatrentClient;
use crate::error::Result;
use boatrent_core::rental::Notification;
use uuid::Uuid;

impl BoatrentClient {
    /// The caller's notifications, newest first.
    pub async fn list_notifications(&self) -> Result<Vec<Notification>> {
        let response = self.get("/api/notifications").send().await?;
        self.handle_response(response).await
    }

    pub async fn mark_notification_read(&self, id: Uuid) -> Result<Notification> {
        let response = self
            .patch(&format!("/api/notifications/{}/read", id))
            .send()
            .await?;
        self.handle_response(response).await
    }
}
