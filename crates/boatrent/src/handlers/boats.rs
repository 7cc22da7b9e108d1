//! Boat handlers: listing, search, CRUD and availability.

use axum::{extract::State, http::StatusCode, Json};
use boatrent_auth::CurrentUser;
use chrono::Utc;
use uuid::Uuid;

use boatrent_core::rental::{
    check_availability, filter_boats, quote, validate_boat, AvailabilityQuery,
    AvailabilityResponse, Boat, BoatSearch, Booking, CreateBoatRequest, ListBoatsQuery,
    UpdateBoatRequest, ValidationError,
};

use super::authz::{require_boat_manager, require_boat_owner};
use crate::error::{ApiError, ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// Loads a boat or fails with 404.
pub(crate) async fn load_boat(state: &AppState, id: Uuid) -> Result<Boat, ApiError> {
    state
        .boats
        .get_boat(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Embarcación no encontrada"))
}

// ============================================================================
// Read
// ============================================================================

/// GET /api/boats
pub async fn list_boats(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListBoatsQuery>,
) -> Result<Json<Vec<Boat>>, ApiError> {
    let boats = state.boats.list_boats(query.owner_id).await?;
    Ok(Json(boats))
}

/// GET /api/boats/{id}
pub async fn get_boat(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Boat>, ApiError> {
    Ok(Json(load_boat(&state, id).await?))
}

/// GET /api/boats/search
///
/// Bookings are only loaded when the search carries a full date window.
pub async fn search_boats(
    State(state): State<AppState>,
    ApiQuery(search): ApiQuery<BoatSearch>,
) -> Result<Json<Vec<Boat>>, ApiError> {
    if let (Some(start), Some(end)) = (search.start_date, search.end_date) {
        if start > end {
            return Err(ValidationError::InvalidDateRange.into());
        }
    }

    let boats = state.boats.list_boats(None).await?;

    let mut bookings: Vec<Booking> = Vec::new();
    if search.start_date.is_some() && search.end_date.is_some() {
        for boat in &boats {
            bookings.extend(state.bookings.list_bookings_by_boat(boat.id).await?);
        }
    }

    let found: Vec<Boat> = filter_boats(&boats, &search, &bookings)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(matches = found.len(), total = boats.len(), "Boat search");
    Ok(Json(found))
}

/// GET /api/boats/{id}/availability?startDate&endDate
///
/// Anonymous check: every live hold counts as a conflict.
pub async fn check_boat_availability(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let boat = load_boat(&state, id).await?;
    let total = quote(&boat, query.start_date, query.end_date)?;

    let bookings = state.bookings.list_bookings_by_boat(id).await?;
    let holds = state.reservations.list_reservations_by_boat(id).await?;

    let verdict = check_availability(
        &boat,
        &bookings,
        &holds,
        query.start_date,
        query.end_date,
        Uuid::nil(),
        Utc::now(),
    );

    Ok(Json(AvailabilityResponse {
        boat_id: id,
        start_date: query.start_date,
        end_date: query.end_date,
        available: verdict.is_ok(),
        total_price_cents: verdict.is_ok().then_some(total),
        reason: verdict.err().map(|e| e.to_string()),
    }))
}

// ============================================================================
// Write
// ============================================================================

/// POST /api/boats
pub async fn create_boat(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateBoatRequest>,
) -> Result<(StatusCode, Json<Boat>), ApiError> {
    require_boat_manager(&user)?;

    let boat = request.into_boat(user.id);
    validate_boat(&boat)?;

    state.boats.create_boat(&boat).await?;
    tracing::info!(boat_id = %boat.id, owner_id = %user.id, "Boat created");

    Ok((StatusCode::CREATED, Json(boat)))
}

/// PUT /api/boats/{id}
pub async fn update_boat(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateBoatRequest>,
) -> Result<Json<Boat>, ApiError> {
    // Reviews rewrite the boat's rating under the same lock.
    let _guard = state.booking_guard.lock().await;
    let mut boat = load_boat(&state, id).await?;
    require_boat_owner(&user, &boat)?;

    request.apply_to(&mut boat);
    validate_boat(&boat)?;
    boat.updated_at = Utc::now();

    state.boats.update_boat(&boat).await?;
    tracing::info!(boat_id = %boat.id, "Boat updated");

    Ok(Json(boat))
}

/// DELETE /api/boats/{id}
pub async fn delete_boat(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    let _guard = state.booking_guard.lock().await;
    let boat = load_boat(&state, id).await?;
    require_boat_owner(&user, &boat)?;

    let bookings = state.bookings.list_bookings_by_boat(id).await?;
    if bookings.iter().any(Booking::is_active) {
        return Err(ApiError::conflict(
            "No se puede eliminar una embarcación con reservas activas",
        ));
    }

    state.boats.delete_boat(id).await?;
    tracing::info!(boat_id = %id, "Boat deleted");

    Ok(StatusCode::NO_CONTENT)
}
