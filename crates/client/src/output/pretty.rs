//! Pretty output formatting.

use boatrent_core::rental::{
    format_cents, AvailabilityResponse, Boat, Booking, Notification, Payment, PaymentOutcome,
    Reservation, Review, User,
};

/// Format a user for display.
pub fn format_user(user: &User) -> String {
    format!(
        "{} <{}>\n  ID: {}\n  Role: {}",
        user.name, user.email, user.id, user.role
    )
}

/// Format a boat for display.
pub fn format_boat(boat: &Boat) -> String {
    let mut output = format!(
        "{} [{}]\n  ID: {}\n  Location: {}\n  Capacity: {}\n  Price/day: {}",
        boat.name,
        boat.boat_type,
        boat.id,
        boat.location,
        boat.capacity,
        format_cents(boat.price_per_day_cents)
    );
    if let Some(rating) = boat.rating {
        output.push_str(&format!(
            "\n  Rating: {:.1} ({} reviews)",
            rating, boat.review_count
        ));
    }
    if !boat.available {
        output.push_str("\n  Not accepting bookings");
    }
    output
}

/// Format boats for display.
pub fn format_boats(boats: &[Boat]) -> String {
    format_list("BOATS", "No boats found.", boats, format_boat)
}

/// Format a booking for display.
pub fn format_booking(booking: &Booking) -> String {
    let mut output = format!(
        "{} to {} ({})\n  ID: {}\n  Boat: {}\n  Guests: {}\n  Total: {}\n  Payment: {}",
        booking.start_date,
        booking.end_date,
        booking.status,
        booking.id,
        booking.boat_id,
        booking.guests,
        format_cents(booking.total_price_cents),
        booking.payment_status
    );
    if let Some(notes) = &booking.notes {
        output.push_str(&format!("\n  Notes: {}", notes));
    }
    if let Some(reason) = &booking.cancellation_reason {
        output.push_str(&format!("\n  Cancelled: {}", reason));
    }
    output
}

/// Format bookings for display.
pub fn format_bookings(bookings: &[Booking]) -> String {
    format_list("BOOKINGS", "No bookings found.", bookings, format_booking)
}

/// Format a payment for display.
pub fn format_payment(payment: &Payment) -> String {
    let mut output = format!(
        "{} via {} ({})\n  ID: {}\n  Booking: {}",
        format_cents(payment.amount_cents),
        payment.method(),
        payment.status,
        payment.id,
        payment.booking_id
    );
    if let Some(reference) = payment.reference() {
        output.push_str(&format!("\n  Reference: {}", reference));
    }
    output
}

/// Format payments for display.
pub fn format_payments(payments: &[Payment]) -> String {
    format_list("PAYMENTS", "No payments found.", payments, format_payment)
}

pub fn format_outcome(outcome: &PaymentOutcome) -> String {
    format!(
        "{}\n\nBooking is now {} / {}",
        format_payment(&outcome.payment),
        outcome.booking.status,
        outcome.booking.payment_status
    )
}

pub fn format_availability(availability: &AvailabilityResponse) -> String {
    match (availability.available, availability.total_price_cents) {
        (true, Some(total)) => format!(
            "Available {} to {}\n  Total: {}",
            availability.start_date,
            availability.end_date,
            format_cents(total)
        ),
        (true, None) => format!(
            "Available {} to {}",
            availability.start_date, availability.end_date
        ),
        (false, _) => format!(
            "Not available {} to {}\n  {}",
            availability.start_date,
            availability.end_date,
            availability.reason.as_deref().unwrap_or_default()
        ),
    }
}

/// Format a review for display.
pub fn format_review(review: &Review) -> String {
    let stars = "*".repeat(usize::from(review.rating));
    match &review.comment {
        Some(comment) => format!("{stars} {}\n  {comment}", review.created_at.date_naive()),
        None => format!("{stars} {}", review.created_at.date_naive()),
    }
}

/// Format reviews for display.
pub fn format_reviews(reviews: &[Review]) -> String {
    format_list("REVIEWS", "No reviews yet.", reviews, format_review)
}

pub fn format_reservation(reservation: &Reservation) -> String {
    format!(
        "Hold {} to {}\n  ID: {}\n  Boat: {}\n  Guests: {}\n  Expires: {}",
        reservation.start_date,
        reservation.end_date,
        reservation.id,
        reservation.boat_id,
        reservation.guests,
        reservation.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// Format a notification for display. Unread ones are starred.
pub fn format_notification(notification: &Notification) -> String {
    let marker = if notification.read { " " } else { "*" };
    format!(
        "{} {} ({})\n  {}\n  ID: {}",
        marker,
        notification.title,
        notification.kind.as_str(),
        notification.message,
        notification.id
    )
}

pub fn format_notifications(notifications: &[Notification]) -> String {
    format_list(
        "NOTIFICATIONS",
        "No notifications.",
        notifications,
        format_notification,
    )
}

fn format_list<T>(title: &str, empty: &str, items: &[T], format: fn(&T) -> String) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    let mut output = format!("{} ({})\n", title, items.len());
    output.push_str(&"-".repeat(40));
    for item in items {
        output.push_str(&format!("\n{}", format(item)));
        output.push('\n');
    }
    output
}
