//! Reservation holds: a short-lived claim on a date range that blocks
//! other users while the holder finishes paying.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use boatrent_auth::CurrentUser;
use chrono::Utc;
use uuid::Uuid;

use boatrent_core::rental::{
    booking_created, check_availability, validate_booking_request, Booking,
    ConfirmReservationRequest, CreateBookingRequest, CreateReservationRequest, Reservation,
};

use super::authz::require_hold_owner;
use super::boats::load_boat;
use super::bookings::place_booking;
use crate::error::{ApiError, ApiJson, ApiPath};
use crate::state::AppState;

async fn load_reservation(state: &AppState, id: Uuid) -> Result<Reservation, ApiError> {
    state
        .reservations
        .get_reservation(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Retención no encontrada"))
}

/// POST /api/reservations
pub async fn create_reservation(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), ApiError> {
    let _guard = state.booking_guard.lock().await;

    let boat = load_boat(&state, request.boat_id).await?;
    let now = Utc::now();
    validate_booking_request(
        &boat,
        request.start_date,
        request.end_date,
        request.guests,
        now.date_naive(),
    )?;

    let bookings = state.bookings.list_bookings_by_boat(boat.id).await?;
    let holds = state.reservations.list_reservations_by_boat(boat.id).await?;
    check_availability(
        &boat,
        &bookings,
        &holds,
        request.start_date,
        request.end_date,
        user.id,
        now,
    )?;

    let reservation = Reservation::new(
        user.id,
        boat.id,
        request.start_date,
        request.end_date,
        request.guests,
        now,
        state.reservation_ttl,
    );
    state.reservations.create_reservation(&reservation).await?;

    tracing::info!(
        reservation_id = %reservation.id,
        boat_id = %boat.id,
        expires_at = %reservation.expires_at,
        "Reservation hold placed"
    );

    Ok((StatusCode::CREATED, Json(reservation)))
}

/// POST /api/reservations/{id}/confirm
///
/// Turns a live hold into a pending booking and releases the hold.
pub async fn confirm_reservation(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    body: Result<Json<ConfirmReservationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let notes = match body {
        Ok(Json(request)) => request.notes,
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(rejection) => return Err(rejection.into()),
    };

    let (booking, boat) = {
        let _guard = state.booking_guard.lock().await;

        let reservation = load_reservation(&state, id).await?;
        require_hold_owner(&user, &reservation)?;
        if !reservation.is_live(Utc::now()) {
            return Err(ApiError::conflict("La retención ha expirado"));
        }

        let mut request = CreateBookingRequest::new(
            reservation.boat_id,
            reservation.start_date,
            reservation.end_date,
            reservation.guests,
        );
        request.notes = notes;

        let placed = place_booking(&state, &user, request).await?;
        state.reservations.delete_reservation(reservation.id).await?;
        placed
    };

    tracing::info!(reservation_id = %id, booking_id = %booking.id, "Reservation confirmed");
    state.notify(booking_created(&boat, &booking)).await;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// DELETE /api/reservations/{id}
pub async fn delete_reservation(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    let reservation = load_reservation(&state, id).await?;
    require_hold_owner(&user, &reservation)?;

    state.reservations.delete_reservation(id).await?;
    tracing::info!(reservation_id = %id, "Reservation released");

    Ok(StatusCode::NO_CONTENT)
}
