//! Payment API operations.

use super::BoatrentClient;
use crate::error::Result;
use boatrent_core::rental::{Payment, PaymentOutcome, ProcessPaymentRequest};
use uuid::Uuid;

impl BoatrentClient {
    /// Pay for a booking.
    pub async fn process_payment(&self, request: &ProcessPaymentRequest) -> Result<PaymentOutcome> {
        let response = self.post("/api/payments").json(request).send().await?;
        self.handle_response(response).await
    }

    /// Get payment by ID.
    pub async fn get_payment(&self, id: Uuid) -> Result<Payment> {
        let response = self.get(&format!("/api/payments/{}", id)).send().await?;
        self.handle_response(response).await
    }

    /// Payments made against a booking.
    pub async fn list_booking_payments(&self, booking_id: Uuid) -> Result<Vec<Payment>> {
        let response = self
            .get(&format!("/api/bookings/{}/payments", booking_id))
            .send()
            .await?;
        self.handle_response(response).await
    }
}
