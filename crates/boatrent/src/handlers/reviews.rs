//! Boat reviews.

use std::collections::HashSet;

use axum::{extract::State, http::StatusCode, Json};
use boatrent_auth::CurrentUser;
use chrono::Utc;
use uuid::Uuid;

use boatrent_core::rental::{
    review_received, validate_review, BookingStatus, CreateReviewRequest, Review,
};

use super::authz::AuthzError;
use super::boats::load_boat;
use crate::error::{ApiError, ApiJson, ApiPath};
use crate::state::AppState;

/// GET /api/boats/{id}/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    ApiPath(boat_id): ApiPath<Uuid>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let boat = load_boat(&state, boat_id).await?;
    Ok(Json(state.reviews.list_reviews_by_boat(boat.id).await?))
}

/// POST /api/boats/{id}/reviews
///
/// Each completed booking earns one review. The review is attached to the
/// oldest completed booking that has not been reviewed yet.
pub async fn create_review(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiPath(boat_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let comment = request
        .comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    validate_review(request.rating, comment.as_deref())?;

    // Held until the boat's rating is written back.
    let guard = state.booking_guard.lock().await;

    let mut boat = load_boat(&state, boat_id).await?;

    let completed: Vec<_> = state
        .bookings
        .list_bookings_by_boat(boat.id)
        .await?
        .into_iter()
        .filter(|b| b.user_id == user.id && b.status == BookingStatus::Completed)
        .collect();
    if completed.is_empty() {
        return Err(AuthzError::NotRenter {
            user_id: user.id,
            boat_id: boat.id,
        }
        .into());
    }

    let reviewed: HashSet<Uuid> = state
        .reviews
        .list_reviews_by_boat(boat.id)
        .await?
        .into_iter()
        .map(|r| r.booking_id)
        .collect();
    let booking = completed
        .into_iter()
        .find(|b| !reviewed.contains(&b.id))
        .ok_or_else(|| ApiError::conflict("Ya publicaste una reseña para esta reserva"))?;

    let review = Review {
        id: Uuid::new_v4(),
        boat_id: boat.id,
        user_id: user.id,
        booking_id: booking.id,
        rating: request.rating,
        comment,
        created_at: Utc::now(),
    };
    state.reviews.create_review(&review).await?;

    boat.record_rating(review.rating);
    boat.updated_at = review.created_at;
    state.boats.update_boat(&boat).await?;
    drop(guard);

    tracing::info!(
        review_id = %review.id,
        boat_id = %boat.id,
        rating = review.rating,
        review_count = boat.review_count,
        "Review posted"
    );
    state
        .notify(review_received(&boat, review.rating, review.id))
        .await;

    Ok((StatusCode::CREATED, Json(review)))
}
