//! Simulated payment handlers.

use axum::{extract::State, http::StatusCode, Json};
use boatrent_auth::CurrentUser;
use chrono::Utc;
use uuid::Uuid;

use boatrent_core::rental::{
    payment_received, process_payment as settle, Payment, PaymentOutcome, PaymentRecordStatus,
    ProcessPaymentRequest,
};

use super::authz::{require_booking_customer, require_booking_party};
use super::bookings::load_booking;
use crate::error::{ApiError, ApiJson, ApiPath};
use crate::state::AppState;

/// POST /api/payments
///
/// Records the payment, then applies its bookkeeping to the booking. The
/// booking write is conditional on what was read, and payments on the same
/// process are serialized so a booking cannot be paid twice. If the booking
/// write fails the payment record is marked failed.
pub async fn process_payment(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ProcessPaymentRequest>,
) -> Result<(StatusCode, Json<PaymentOutcome>), ApiError> {
    let outcome = {
        let _guard = state.booking_guard.lock().await;

        let booking = load_booking(&state, request.booking_id).await?;
        require_booking_customer(&user, &booking)?;

        let outcome = settle(&booking, &request, user.id, Utc::now())?;
        state.payments.create_payment(&outcome.payment).await?;

        if let Err(err) = state
            .bookings
            .update_booking_if_unchanged(&outcome.booking, &booking)
            .await
        {
            mark_failed(&state, &outcome.payment).await;
            return Err(err.into());
        }
        outcome
    };

    tracing::info!(
        payment_id = %outcome.payment.id,
        booking_id = %outcome.booking.id,
        method = %outcome.payment.method(),
        status = %outcome.payment.status,
        "Payment processed"
    );

    if let Some(boat) = state.boats.get_boat(outcome.booking.boat_id).await? {
        state.notify(payment_received(&boat, &outcome.payment)).await;
    }

    Ok((StatusCode::CREATED, Json(outcome)))
}

/// Best-effort: the booking error is what the caller sees.
async fn mark_failed(state: &AppState, payment: &Payment) {
    let failed = Payment {
        status: PaymentRecordStatus::Failed,
        updated_at: Utc::now(),
        ..payment.clone()
    };
    match state.payments.update_payment(&failed).await {
        Ok(()) => tracing::warn!(payment_id = %payment.id, "Payment marked failed"),
        Err(err) => tracing::error!(
            payment_id = %payment.id,
            error = %err,
            "Failed to mark payment failed"
        ),
    }
}

/// GET /api/payments/{id}
pub async fn get_payment(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Payment>, ApiError> {
    let payment = state
        .payments
        .get_payment(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Pago no encontrado"))?;

    let booking = load_booking(&state, payment.booking_id).await?;
    let boat = state.boats.get_boat(booking.boat_id).await?;
    require_booking_party(&user, &booking, boat.as_ref())?;

    Ok(Json(payment))
}
