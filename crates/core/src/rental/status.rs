use chrono::{DateTime, Utc};

use super::error::StatusError;
use super::types::{Booking, BookingStatus, PaymentStatus};

/// Whether a booking may move from `from` to `to`.
pub fn can_transition(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;

    matches!(
        (from, to),
        (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
    )
}

/// Returns the booking with its status changed to `to`.
///
/// Moving to `cancelled` goes through [`cancel_booking`] so the payment
/// bookkeeping stays consistent.
pub fn transition_booking(
    booking: &Booking,
    to: BookingStatus,
    reason: Option<String>,
    now: DateTime<Utc>,
) -> Result<Booking, StatusError> {
    if !can_transition(booking.status, to) {
        return Err(StatusError::InvalidTransition {
            from: booking.status,
            to,
        });
    }
    if to == BookingStatus::Cancelled {
        return cancel_booking(booking, reason, now);
    }

    let mut updated = booking.clone();
    updated.status = to;
    updated.updated_at = now;
    Ok(updated)
}

/// Returns the booking cancelled. A paid booking is marked refunded.
pub fn cancel_booking(
    booking: &Booking,
    reason: Option<String>,
    now: DateTime<Utc>,
) -> Result<Booking, StatusError> {
    if !booking.is_active() {
        return Err(StatusError::NotCancellable);
    }

    let mut updated = booking.clone();
    updated.status = BookingStatus::Cancelled;
    updated.cancellation_reason = reason.filter(|r| !r.trim().is_empty());
    if updated.payment_status == PaymentStatus::Paid {
        updated.payment_status = PaymentStatus::Refunded;
    }
    updated.updated_at = now;
    Ok(updated)
}
