//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and domain types.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;
use std::str::FromStr;

use aws_sdk_dynamodb::types::AttributeValue;
use boatrent_core::rental::{
    Boat, Booking, Notification, Payment, PaymentDetails, Reservation, Review, User,
};
use boatrent_core::storage::RepositoryError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use uuid::Uuid;

pub type Item = HashMap<String, AttributeValue>;

/// Small builder so each `*_to_item` reads as a field list.
#[derive(Default)]
struct ItemBuilder(Item);

impl ItemBuilder {
    fn s(mut self, key: &str, value: impl Into<String>) -> Self {
        self.0.insert(key.to_string(), AttributeValue::S(value.into()));
        self
    }

    fn opt_s(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.s(key, v),
            None => self,
        }
    }

    fn n(mut self, key: &str, value: impl ToString) -> Self {
        self.0
            .insert(key.to_string(), AttributeValue::N(value.to_string()));
        self
    }

    fn bool(mut self, key: &str, value: bool) -> Self {
        self.0.insert(key.to_string(), AttributeValue::Bool(value));
        self
    }

    fn list(mut self, key: &str, values: &[String]) -> Self {
        let list = values.iter().cloned().map(AttributeValue::S).collect();
        self.0.insert(key.to_string(), AttributeValue::L(list));
        self
    }

    fn date(self, key: &str, date: NaiveDate) -> Self {
        self.s(key, date.format("%Y-%m-%d").to_string())
    }

    fn time(self, key: &str, at: DateTime<Utc>) -> Self {
        self.s(key, at.to_rfc3339())
    }

    fn build(self) -> Item {
        self.0
    }
}

// ============================================================================
// User
// ============================================================================

/// Convert a User to DynamoDB item. Unlike the API shape, this keeps the hash.
pub fn user_to_item(user: &User) -> Item {
    ItemBuilder::default()
        .s("id", user.id.to_string())
        .s("email", &user.email)
        .s("name", &user.name)
        .opt_s("phone", user.phone.as_deref())
        .s("role", user.role.as_str())
        .s("passwordHash", &user.password_hash)
        .time("createdAt", user.created_at)
        .time("updatedAt", user.updated_at)
        .build()
}

/// Convert a DynamoDB item to User.
pub fn item_to_user(item: &Item) -> Result<User, RepositoryError> {
    Ok(User {
        id: get_uuid(item, "id")?,
        email: get_string(item, "email")?,
        name: get_string(item, "name")?,
        phone: get_optional_string(item, "phone"),
        role: get_enum(item, "role")?,
        password_hash: get_string(item, "passwordHash")?,
        created_at: get_datetime(item, "createdAt")?,
        updated_at: get_datetime(item, "updatedAt")?,
    })
}

// ============================================================================
// Boat
// ============================================================================

/// Convert a Boat to DynamoDB item.
pub fn boat_to_item(boat: &Boat) -> Item {
    let mut builder = ItemBuilder::default()
        .s("id", boat.id.to_string())
        .s("ownerId", boat.owner_id.to_string())
        .s("name", &boat.name)
        .opt_s("description", boat.description.as_deref())
        .s("boatType", boat.boat_type.as_str())
        .s("location", &boat.location)
        .n("capacity", boat.capacity)
        .n("pricePerDayCents", boat.price_per_day_cents)
        .list("amenities", &boat.amenities)
        .list("images", &boat.images)
        .bool("available", boat.available)
        .n("reviewCount", boat.review_count)
        .time("createdAt", boat.created_at)
        .time("updatedAt", boat.updated_at);
    if let Some(rating) = boat.rating {
        builder = builder.n("rating", rating);
    }
    builder.build()
}

/// Convert a DynamoDB item to Boat.
pub fn item_to_boat(item: &Item) -> Result<Boat, RepositoryError> {
    Ok(Boat {
        id: get_uuid(item, "id")?,
        owner_id: get_uuid(item, "ownerId")?,
        name: get_string(item, "name")?,
        description: get_optional_string(item, "description"),
        boat_type: get_enum(item, "boatType")?,
        location: get_string(item, "location")?,
        capacity: get_number(item, "capacity")?,
        price_per_day_cents: get_number(item, "pricePerDayCents")?,
        amenities: get_string_list(item, "amenities"),
        images: get_string_list(item, "images"),
        available: get_bool(item, "available")?,
        rating: get_optional_number(item, "rating")?,
        review_count: get_optional_number(item, "reviewCount")?.unwrap_or(0),
        created_at: get_datetime(item, "createdAt")?,
        updated_at: get_datetime(item, "updatedAt")?,
    })
}

// ============================================================================
// Booking
// ============================================================================

/// Convert a Booking to DynamoDB item.
pub fn booking_to_item(booking: &Booking) -> Item {
    ItemBuilder::default()
        .s("id", booking.id.to_string())
        .s("userId", booking.user_id.to_string())
        .s("boatId", booking.boat_id.to_string())
        .date("startDate", booking.start_date)
        .date("endDate", booking.end_date)
        .n("guests", booking.guests)
        .n("totalPriceCents", booking.total_price_cents)
        .s("status", booking.status.as_str())
        .s("paymentStatus", booking.payment_status.as_str())
        .opt_s("notes", booking.notes.as_deref())
        .opt_s("cancellationReason", booking.cancellation_reason.as_deref())
        .time("createdAt", booking.created_at)
        .time("updatedAt", booking.updated_at)
        .build()
}

/// Convert a DynamoDB item to Booking.
pub fn item_to_booking(item: &Item) -> Result<Booking, RepositoryError> {
    Ok(Booking {
        id: get_uuid(item, "id")?,
        user_id: get_uuid(item, "userId")?,
        boat_id: get_uuid(item, "boatId")?,
        start_date: get_date(item, "startDate")?,
        end_date: get_date(item, "endDate")?,
        guests: get_number(item, "guests")?,
        total_price_cents: get_number(item, "totalPriceCents")?,
        status: get_enum(item, "status")?,
        payment_status: get_enum(item, "paymentStatus")?,
        notes: get_optional_string(item, "notes"),
        cancellation_reason: get_optional_string(item, "cancellationReason"),
        created_at: get_datetime(item, "createdAt")?,
        updated_at: get_datetime(item, "updatedAt")?,
    })
}

// ============================================================================
// Reservation
// ============================================================================

/// Convert a Reservation to DynamoDB item.
pub fn reservation_to_item(reservation: &Reservation) -> Item {
    ItemBuilder::default()
        .s("id", reservation.id.to_string())
        .s("userId", reservation.user_id.to_string())
        .s("boatId", reservation.boat_id.to_string())
        .date("startDate", reservation.start_date)
        .date("endDate", reservation.end_date)
        .n("guests", reservation.guests)
        .time("expiresAt", reservation.expires_at)
        // DynamoDB TTL attribute (epoch seconds)
        .n("ttl", reservation.expires_at.timestamp())
        .time("createdAt", reservation.created_at)
        .build()
}

/// Convert a DynamoDB item to Reservation.
pub fn item_to_reservation(item: &Item) -> Result<Reservation, RepositoryError> {
    Ok(Reservation {
        id: get_uuid(item, "id")?,
        user_id: get_uuid(item, "userId")?,
        boat_id: get_uuid(item, "boatId")?,
        start_date: get_date(item, "startDate")?,
        end_date: get_date(item, "endDate")?,
        guests: get_number(item, "guests")?,
        expires_at: get_datetime(item, "expiresAt")?,
        created_at: get_datetime(item, "createdAt")?,
    })
}

// ============================================================================
// Payment
// ============================================================================

/// Convert a Payment to DynamoDB item.
///
/// The method-specific details are stored as a JSON string; `method` and
/// `reference` are duplicated as plain attributes for console filtering.
pub fn payment_to_item(payment: &Payment) -> Result<Item, RepositoryError> {
    let details = serde_json::to_string(&payment.details)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

    Ok(ItemBuilder::default()
        .s("id", payment.id.to_string())
        .s("bookingId", payment.booking_id.to_string())
        .s("userId", payment.user_id.to_string())
        .n("amountCents", payment.amount_cents)
        .s("method", payment.method().as_str())
        .s("status", payment.status.as_str())
        .opt_s("reference", payment.details.reference())
        .s("details", details)
        .time("createdAt", payment.created_at)
        .time("updatedAt", payment.updated_at)
        .build())
}

/// Convert a DynamoDB item to Payment.
pub fn item_to_payment(item: &Item) -> Result<Payment, RepositoryError> {
    let details_json = get_string(item, "details")?;
    let details: PaymentDetails = serde_json::from_str(&details_json)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

    Ok(Payment {
        id: get_uuid(item, "id")?,
        booking_id: get_uuid(item, "bookingId")?,
        user_id: get_uuid(item, "userId")?,
        amount_cents: get_number(item, "amountCents")?,
        status: get_enum(item, "status")?,
        details,
        created_at: get_datetime(item, "createdAt")?,
        updated_at: get_datetime(item, "updatedAt")?,
    })
}

// ============================================================================
// Review
// ============================================================================

/// Convert a Review to DynamoDB item.
pub fn review_to_item(review: &Review) -> Item {
    ItemBuilder::default()
        .s("id", review.id.to_string())
        .s("boatId", review.boat_id.to_string())
        .s("userId", review.user_id.to_string())
        .s("bookingId", review.booking_id.to_string())
        .n("rating", review.rating)
        .opt_s("comment", review.comment.as_deref())
        .time("createdAt", review.created_at)
        .build()
}

/// Convert a DynamoDB item to Review.
pub fn item_to_review(item: &Item) -> Result<Review, RepositoryError> {
    Ok(Review {
        id: get_uuid(item, "id")?,
        boat_id: get_uuid(item, "boatId")?,
        user_id: get_uuid(item, "userId")?,
        booking_id: get_uuid(item, "bookingId")?,
        rating: get_number(item, "rating")?,
        comment: get_optional_string(item, "comment"),
        created_at: get_datetime(item, "createdAt")?,
    })
}

// ============================================================================
// Notification
// ============================================================================

/// Convert a Notification to DynamoDB item.
pub fn notification_to_item(notification: &Notification) -> Item {
    let related = notification.related_id.map(|id| id.to_string());
    ItemBuilder::default()
        .s("id", notification.id.to_string())
        .s("userId", notification.user_id.to_string())
        .s("kind", notification.kind.as_str())
        .s("title", &notification.title)
        .s("message", &notification.message)
        .bool("read", notification.read)
        .opt_s("relatedId", related.as_deref())
        .time("createdAt", notification.created_at)
        .build()
}

/// Convert a DynamoDB item to Notification.
pub fn item_to_notification(item: &Item) -> Result<Notification, RepositoryError> {
    let related_id = match get_optional_string(item, "relatedId") {
        Some(s) => Some(parse_uuid("relatedId", &s)?),
        None => None,
    };

    Ok(Notification {
        id: get_uuid(item, "id")?,
        user_id: get_uuid(item, "userId")?,
        kind: get_enum(item, "kind")?,
        title: get_string(item, "title")?,
        message: get_string(item, "message")?,
        read: get_bool(item, "read")?,
        related_id,
        created_at: get_datetime(item, "createdAt")?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
fn get_string(item: &Item, key: &str) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
fn get_optional_string(item: &Item, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

fn parse_uuid(key: &str, s: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(s)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid UUID {}: {}", key, e)))
}

/// Get a required UUID attribute.
fn get_uuid(item: &Item, key: &str) -> Result<Uuid, RepositoryError> {
    parse_uuid(key, &get_string(item, key)?)
}

/// Get a required date attribute (YYYY-MM-DD format).
fn get_date(item: &Item, key: &str) -> Result<NaiveDate, RepositoryError> {
    let s = get_string(item, key)?;
    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid date {}: {}", key, e)))
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(item: &Item, key: &str) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}

/// Get an optional numeric attribute.
fn get_optional_number<T: FromStr>(item: &Item, key: &str) -> Result<Option<T>, RepositoryError> {
    match item.get(key).and_then(|v| v.as_n().ok()) {
        Some(n) => n
            .parse()
            .map(Some)
            .map_err(|_| RepositoryError::InvalidData(format!("Invalid number {}: {}", key, n))),
        None => Ok(None),
    }
}

/// Get a required numeric attribute.
fn get_number<T: FromStr>(item: &Item, key: &str) -> Result<T, RepositoryError> {
    get_optional_number(item, key)?
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

fn get_bool(item: &Item, key: &str) -> Result<bool, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Missing lists read as empty.
fn get_string_list(item: &Item, key: &str) -> Vec<String> {
    item.get(key)
        .and_then(|v| v.as_l().ok())
        .map(|list| {
            list.iter()
                .filter_map(|v| v.as_s().ok().cloned())
                .collect()
        })
        .unwrap_or_default()
}

/// Get a unit-variant enum stored as its serde string form.
fn get_enum<T: DeserializeOwned>(item: &Item, key: &str) -> Result<T, RepositoryError> {
    let s = get_string(item, key)?;
    serde_json::from_value(serde_json::Value::String(s.clone()))
        .map_err(|_| RepositoryError::InvalidData(format!("Unknown {}: {}", key, s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use boatrent_core::rental::{
        BoatType, BookingStatus, NotificationKind, PaymentRecordStatus, PaymentStatus, Role,
    };

    fn id(n: u8) -> Uuid {
        Uuid::parse_str(&format!("550e8400-e29b-41d4-a716-4466554400{:02}", n)).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_user_round_trip_keeps_password_hash() {
        let user = User::new("ana@example.com", "Ana", Role::Owner, "$2b$04$hash")
            .with_phone("+58 412 0000000")
            .with_id(id(1));

        let item = user_to_item(&user);
        let parsed = item_to_user(&item).unwrap();

        assert_eq!(parsed, user);
        assert_eq!(item.get("role").unwrap().as_s().unwrap(), "owner");
    }

    #[test]
    fn test_boat_round_trip() {
        let mut boat = Boat::new(id(1), "Lola", BoatType::Catamaran, "Los Roques", 10, 90_000)
            .with_description("Amplio")
            .with_amenities(["GPS", "Nevera"])
            .with_id(id(2));
        boat.record_rating(4);

        let item = boat_to_item(&boat);
        let parsed = item_to_boat(&item).unwrap();

        assert_eq!(parsed.id, boat.id);
        assert_eq!(parsed.boat_type, BoatType::Catamaran);
        assert_eq!(parsed.amenities, vec!["GPS", "Nevera"]);
        assert_eq!(parsed.rating, Some(4.0));
        assert_eq!(parsed.review_count, 1);
        assert_eq!(parsed.price_per_day_cents, 90_000);
    }

    #[test]
    fn test_boat_without_rating_omits_attribute() {
        let boat = Boat::new(id(1), "Lola", BoatType::Yacht, "Mochima", 4, 10_000);
        let item = boat_to_item(&boat);

        assert!(!item.contains_key("rating"));
        assert!(item_to_boat(&item).unwrap().rating.is_none());
    }

    #[test]
    fn test_booking_round_trip() {
        let booking = Booking::new(id(3), id(2), date(2030, 1, 10), date(2030, 1, 12), 4, 150_000)
            .with_status(BookingStatus::Confirmed)
            .with_notes("Llegamos temprano");

        let item = booking_to_item(&booking);
        let parsed = item_to_booking(&item).unwrap();

        assert_eq!(parsed, booking);
        assert_eq!(item.get("startDate").unwrap().as_s().unwrap(), "2030-01-10");
        assert_eq!(item.get("paymentStatus").unwrap().as_s().unwrap(), "unpaid");
        assert_eq!(parsed.payment_status, PaymentStatus::Unpaid);
    }

    #[test]
    fn test_reservation_item_has_ttl() {
        let now = Utc::now();
        let reservation = Reservation::new(
            id(3),
            id(2),
            date(2030, 1, 10),
            date(2030, 1, 12),
            2,
            now,
            chrono::Duration::minutes(30),
        );

        let item = reservation_to_item(&reservation);

        assert_eq!(
            item.get("ttl").unwrap().as_n().unwrap(),
            &reservation.expires_at.timestamp().to_string()
        );
        assert_eq!(item_to_reservation(&item).unwrap().id, reservation.id);
    }

    #[test]
    fn test_payment_round_trip() {
        let now = Utc::now();
        let payment = Payment {
            id: id(4),
            booking_id: id(5),
            user_id: id(3),
            amount_cents: 150_000,
            status: PaymentRecordStatus::Completed,
            details: PaymentDetails::PagoMovil {
                phone: "04120000000".to_string(),
                bank_code: "0102".to_string(),
                reference: "REF-1".to_string(),
            },
            created_at: now,
            updated_at: now,
        };

        let item = payment_to_item(&payment).unwrap();
        let parsed = item_to_payment(&item).unwrap();

        assert_eq!(parsed.details, payment.details);
        assert_eq!(item.get("method").unwrap().as_s().unwrap(), "pago_movil");
        assert_eq!(item.get("reference").unwrap().as_s().unwrap(), "REF-1");
    }

    #[test]
    fn test_notification_round_trip() {
        let note = Notification::new(
            id(1),
            NotificationKind::PaymentReceived,
            "Pago recibido",
            "Detalle",
            Some(id(5)),
        );

        let parsed = item_to_notification(&notification_to_item(&note)).unwrap();

        assert_eq!(parsed, note);
    }

    #[test]
    fn test_unknown_enum_value_is_invalid_data() {
        let mut item = user_to_item(&User::new("a@b.co", "A", Role::Customer, "h"));
        item.insert("role".to_string(), AttributeValue::S("captain".to_string()));

        assert!(matches!(
            item_to_user(&item),
            Err(RepositoryError::InvalidData(_))
        ));
    }

    #[test]
    fn test_get_string_missing_field() {
        let item = HashMap::new();
        assert!(get_string(&item, "missing").is_err());
    }

    #[test]
    fn test_get_string_list_missing_is_empty() {
        let item = HashMap::new();
        assert!(get_string_list(&item, "amenities").is_empty());
    }
}
