//! Booking handlers.
//!
//! Creation runs the overlap check against active bookings and live holds.
//! Status writes hold `booking_guard` and are conditional on the status and
//! payment status that were read, so a concurrent change is never overwritten.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use boatrent_auth::CurrentUser;
use chrono::Utc;
use uuid::Uuid;

use boatrent_core::rental::{
    booking_created, booking_status_changed, cancel_booking as cancel, check_availability,
    quote, transition_booking, validate_booking_request, Boat, Booking, CancelBookingRequest, CreateBookingRequest, ListBookingsQuery, Payment,
    PaymentRecordStatus, PaymentStatus, UpdateBookingStatusRequest, User,
};

use super::authz::{require_admin, require_boat_owner, require_booking_party};
use super::boats::load_boat;
use crate::error::{ApiError, ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// Loads a booking or fails with 404.
pub(crate) async fn load_booking(state: &AppState, id: Uuid) -> Result<Booking, ApiError> {
    state
        .bookings
        .get_booking(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Reserva no encontrada"))
}

/// Loads a booking the user may see, along with its boat if it still exists.
pub(crate) async fn load_visible_booking(
    state: &AppState,
    user: &User,
    id: Uuid,
) -> Result<(Booking, Option<Boat>), ApiError> {
    let booking = load_booking(state, id).await?;
    let boat = state.boats.get_boat(booking.boat_id).await?;
    require_booking_party(user, &booking, boat.as_ref())?;
    Ok((booking, boat))
}

/// Validates the request and checks the boat is free, then inserts the booking.
///
/// Shared by direct booking and by confirming a reservation hold. The caller
/// holds `booking_guard` for the duration.
pub(crate) async fn place_booking(
    state: &AppState,
    user: &User,
    request: CreateBookingRequest,
) -> Result<(Booking, Boat), ApiError> {
    let boat = load_boat(state, request.boat_id).await?;
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

    let total = quote(&boat, request.start_date, request.end_date)?;
    let mut booking = Booking::new(
        user.id,
        boat.id,
        request.start_date,
        request.end_date,
        request.guests,
        total,
    );
    if let Some(notes) = request.notes.filter(|n| !n.trim().is_empty()) {
        booking = booking.with_notes(notes.trim());
    }

    state.bookings.create_booking(&booking).await?;
    tracing::info!(
        booking_id = %booking.id,
        boat_id = %boat.id,
        user_id = %user.id,
        total_price_cents = total,
        "Booking created"
    );

    Ok((booking, boat))
}

/// Writes a status change only if nobody else changed the booking first.
async fn save_status_change(
    state: &AppState,
    updated: &Booking,
    previous: &Booking,
) -> Result<(), ApiError> {
    state
        .bookings
        .update_booking_if_unchanged(updated, previous)
        .await
        .map_err(ApiError::from)
}

/// Marks completed payments refunded after a paid booking is cancelled.
async fn refund_payments(state: &AppState, booking: &Booking) -> Result<(), ApiError> {
    let payments = state.payments.list_payments_by_booking(booking.id).await?;
    let now = Utc::now();

    for payment in payments
        .into_iter()
        .filter(|p| p.status == PaymentRecordStatus::Completed)
    {
        let refunded = Payment {
            status: PaymentRecordStatus::Refunded,
            updated_at: now,
            ..payment
        };
        state.payments.update_payment(&refunded).await?;
        tracing::info!(payment_id = %refunded.id, booking_id = %booking.id, "Payment refunded");
    }
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/bookings
pub async fn create_booking(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let (booking, boat) = {
        let _guard = state.booking_guard.lock().await;
        place_booking(&state, &user, request).await?
    };

    state.notify(booking_created(&boat, &booking)).await;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /api/bookings
///
/// Lists the caller's bookings. Admins may pass `?userId=` to list someone else's.
pub async fn list_bookings(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListBookingsQuery>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let target = match query.user_id {
        Some(id) if id != user.id => {
            require_admin(&user)?;
            id
        }
        _ => user.id,
    };

    Ok(Json(state.bookings.list_bookings_by_user(target).await?))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Booking>, ApiError> {
    let (booking, _) = load_visible_booking(&state, &user, id).await?;
    Ok(Json(booking))
}

/// PATCH /api/bookings/{id}/status
pub async fn update_booking_status(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateBookingStatusRequest>,
) -> Result<Json<Booking>, ApiError> {
    let (booking, updated, boat) = {
        let _guard = state.booking_guard.lock().await;

        let booking = load_booking(&state, id).await?;
        let boat = load_boat(&state, booking.boat_id).await?;
        require_boat_owner(&user, &boat)?;

        let updated = transition_booking(&booking, request.status, request.reason, Utc::now())?;
        save_status_change(&state, &updated, &booking).await?;

        if updated.payment_status == PaymentStatus::Refunded
            && booking.payment_status == PaymentStatus::Paid
        {
            refund_payments(&state, &updated).await?;
        }
        (booking, updated, boat)
    };

    tracing::info!(
        booking_id = %id,
        from = %booking.status,
        to = %updated.status,
        "Booking status changed"
    );

    state.notify(booking_status_changed(&boat, &updated)).await;

    Ok(Json(updated))
}

/// POST /api/bookings/{id}/cancel
pub async fn cancel_booking(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    body: Result<Json<CancelBookingRequest>, JsonRejection>,
) -> Result<Json<Booking>, ApiError> {
    // The body is optional; a request without one cancels with no reason.
    let reason = match body {
        Ok(Json(request)) => request.reason,
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(rejection) => return Err(rejection.into()),
    };
    let (updated, boat) = {
        let _guard = state.booking_guard.lock().await;

        let (booking, boat) = load_visible_booking(&state, &user, id).await?;
        let updated = cancel(&booking, reason, Utc::now())?;
        save_status_change(&state, &updated, &booking).await?;

        if updated.payment_status == PaymentStatus::Refunded {
            refund_payments(&state, &updated).await?;
        }
        (updated, boat)
    };

    tracing::info!(booking_id = %id, cancelled_by = %user.id, "Booking cancelled");

    if let Some(boat) = boat {
        state.notify(booking_status_changed(&boat, &updated)).await;
    }

    Ok(Json(updated))
}

/// GET /api/bookings/{id}/payments
pub async fn list_booking_payments(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Vec<Payment>>, ApiError> {
    let (booking, _) = load_visible_booking(&state, &user, id).await?;
    Ok(Json(
        state.payments.list_payments_by_booking(booking.id).await?,
    ))
}
