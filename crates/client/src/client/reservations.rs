//! Reservation hold API operations.

use super::BoatrentClient;
use crate::error::Result;
use boatrent_core::rental::{
    Booking, ConfirmReservationRequest, CreateReservationRequest, Reservation,
};
use uuid::Uuid;

impl BoatrentClient {
    /// Hold a date range while paying.
    pub async fn create_reservation(
        &self,
        request: &CreateReservationRequest,
    ) -> Result<Reservation> {
        let response = self.post("/api/reservations").json(request).send().await?;
        self.handle_response(response).await
    }

    /// Turn a live hold into a pending booking.
    pub async fn confirm_reservation(&self, id: Uuid, notes: Option<String>) -> Result<Booking> {
        let response = self
            .post(&format!("/api/reservations/{}/confirm", id))
            .json(&ConfirmReservationRequest { notes })
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Release a hold before it expires.
    pub async fn release_reservation(&self, id: Uuid) -> Result<()> {
        let response = self
            .delete(&format!("/api/reservations/{}", id))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}
