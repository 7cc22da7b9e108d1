//! Booking API operations.

use super::BoatrentClient;
use crate::error::Result;
use boatrent_core::rental::{
    Booking, BookingStatus, CancelBookingRequest, CreateBookingRequest, ListBookingsQuery,
    UpdateBookingStatusRequest,
};
use uuid::Uuid;

impl BoatrentClient {
    /// List the caller's bookings, or another user's as an admin.
    pub async fn list_bookings(&self, user_id: Option<Uuid>) -> Result<Vec<Booking>> {
        let response = self
            .get("/api/bookings")
            .query(&ListBookingsQuery { user_id })
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Get booking by ID.
    pub async fn get_booking(&self, id: Uuid) -> Result<Booking> {
        let response = self.get(&format!("/api/bookings/{}", id)).send().await?;
        self.handle_response(response).await
    }

    /// Book a boat.
    pub async fn create_booking(&self, request: &CreateBookingRequest) -> Result<Booking> {
        let response = self.post("/api/bookings").json(request).send().await?;
        self.handle_response(response).await
    }

    /// Move a booking to a new status.
    pub async fn update_booking_status(
        &self,
        id: Uuid,
        status: BookingStatus,
        reason: Option<String>,
    ) -> Result<Booking> {
        let response = self
            .patch(&format!("/api/bookings/{}/status", id))
            .json(&UpdateBookingStatusRequest { status, reason })
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Cancel a booking.
    pub async fn cancel_booking(&self, id: Uuid, reason: Option<String>) -> Result<Booking> {
        let response = self
            .post(&format!("/api/bookings/{}/cancel", id))
            .json(&CancelBookingRequest { reason })
            .send()
            .await?;
        self.handle_response(response).await
    }
}
