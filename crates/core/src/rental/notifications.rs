//! Builders for the in-app notifications emitted by rental actions.

use uuid::Uuid;

use super::types::{Boat, Booking, BookingStatus, Notification, NotificationKind, Payment};

fn status_label(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pending => "pendiente",
        BookingStatus::Confirmed => "confirmada",
        BookingStatus::Completed => "completada",
        BookingStatus::Cancelled => "cancelada",
    }
}

/// Tells the boat owner a new booking arrived.
pub fn booking_created(boat: &Boat, booking: &Booking) -> Notification {
    Notification::new(
        boat.owner_id,
        NotificationKind::BookingCreated,
        "Nueva reserva",
        format!(
            "Tienes una nueva reserva para {} del {} al {}",
            boat.name, booking.start_date, booking.end_date
        ),
        Some(booking.id),
    )
}

/// Tells the customer their booking changed status.
pub fn booking_status_changed(boat: &Boat, booking: &Booking) -> Notification {
    let mut message = format!(
        "Tu reserva de {} ahora está {}",
        boat.name,
        status_label(booking.status)
    );
    if let Some(reason) = &booking.cancellation_reason {
        message.push_str(&format!(". Motivo: {reason}"));
    }
    Notification::new(
        booking.user_id,
        NotificationKind::BookingStatusChanged,
        "Actualización de reserva",
        message,
        Some(booking.id),
    )
}

/// Tells the boat owner a payment was submitted.
pub fn payment_received(boat: &Boat, payment: &Payment) -> Notification {
    Notification::new(
        boat.owner_id,
        NotificationKind::PaymentReceived,
        "Pago recibido",
        format!(
            "Se registró un pago de {} por {} para {}",
            format_cents(payment.amount_cents),
            payment.method(),
            boat.name
        ),
        Some(payment.booking_id),
    )
}

/// Tells the boat owner a review was posted.
pub fn review_received(boat: &Boat, rating: u8, review_id: Uuid) -> Notification {
    Notification::new(
        boat.owner_id,
        NotificationKind::ReviewReceived,
        "Nueva reseña",
        format!("{} recibió una calificación de {rating}/5", boat.name),
        Some(review_id),
    )
}

/// Formats cents as a dollar amount, e.g. `$1250.00`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::rental::types::BoatType;

    fn fixtures() -> (Boat, Booking) {
        let boat = Boat::new(Uuid::new_v4(), "Lola", BoatType::Yacht, "Margarita", 8, 50_000);
        let day = NaiveDate::from_ymd_opt(2030, 4, 1).unwrap();
        let booking = Booking::new(Uuid::new_v4(), boat.id, day, day, 2, 50_000);
        (boat, booking)
    }

    #[test]
    fn test_booking_created_targets_owner() {
        let (boat, booking) = fixtures();
        let note = booking_created(&boat, &booking);

        assert_eq!(note.user_id, boat.owner_id);
        assert_eq!(note.kind, NotificationKind::BookingCreated);
        assert_eq!(note.related_id, Some(booking.id));
        assert!(!note.read);
    }

    #[test]
    fn test_status_change_targets_customer_with_reason() {
        let (boat, mut booking) = fixtures();
        booking.status = BookingStatus::Cancelled;
        booking.cancellation_reason = Some("Mantenimiento".to_string());

        let note = booking_status_changed(&boat, &booking);

        assert_eq!(note.user_id, booking.user_id);
        assert_eq!(
            note.message,
            "Tu reserva de Lola ahora está cancelada. Motivo: Mantenimiento"
        );
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(125_000), "$1250.00");
        assert_eq!(format_cents(5), "$0.05");
        assert_eq!(format_cents(-150), "-$1.50");
    }
}
