//! API request types for rental operations.
//!
//! Shared between the server and client for type-safe API communication.
//! Pure data types with no I/O.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{Boat, BoatType, BookingStatus, PaymentMethod};
use crate::serde::{deserialize_optional_date, deserialize_optional_string};

/// Request payload for publishing a boat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoatRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub boat_type: BoatType,
    pub location: String,
    pub capacity: u32,
    pub price_per_day_cents: i64,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl CreateBoatRequest {
    pub fn new(
        name: impl Into<String>,
        boat_type: BoatType,
        location: impl Into<String>,
        capacity: u32,
        price_per_day_cents: i64,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            boat_type,
            location: location.into(),
            capacity,
            price_per_day_cents,
            amenities: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Convert into a Boat owned by `owner_id`.
    pub fn into_boat(self, owner_id: Uuid) -> Boat {
        let mut boat = Boat::new(
            owner_id,
            self.name.trim(),
            self.boat_type,
            self.location.trim(),
            self.capacity,
            self.price_per_day_cents,
        );
        boat.description = self.description;
        boat.amenities = self.amenities;
        boat.images = self.images;
        boat
    }
}

/// Request payload for updating a boat. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoatRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boat_type: Option<BoatType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_day_cents: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl UpdateBoatRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, price_per_day_cents: i64) -> Self {
        self.price_per_day_cents = Some(price_per_day_cents);
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    /// Apply updates to an existing boat.
    pub fn apply_to(self, boat: &mut Boat) {
        if let Some(name) = self.name {
            boat.name = name.trim().to_string();
        }
        if let Some(description) = self.description {
            boat.description = Some(description);
        }
        if let Some(boat_type) = self.boat_type {
            boat.boat_type = boat_type;
        }
        if let Some(location) = self.location {
            boat.location = location.trim().to_string();
        }
        if let Some(capacity) = self.capacity {
            boat.capacity = capacity;
        }
        if let Some(price) = self.price_per_day_cents {
            boat.price_per_day_cents = price;
        }
        if let Some(amenities) = self.amenities {
            boat.amenities = amenities;
        }
        if let Some(images) = self.images {
            boat.images = images;
        }
        if let Some(available) = self.available {
            boat.available = available;
        }
    }
}

/// Query parameters for `GET /api/boats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBoatsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Uuid>,
}

/// Search criteria for `GET /api/boats/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoatSearch {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub q: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boat_type: Option<BoatType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_capacity: Option<u32>,
    /// Maximum price per day, in cents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<i64>,
    #[serde(default)]
    pub available_only: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,
}

/// Query parameters for `GET /api/boats/{id}/availability`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Response body for an availability check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub boat_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price_cents: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Request payload for creating a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub boat_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub guests: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreateBookingRequest {
    pub fn new(boat_id: Uuid, start_date: NaiveDate, end_date: NaiveDate, guests: u32) -> Self {
        Self {
            boat_id,
            start_date,
            end_date,
            guests,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Query parameters for `GET /api/bookings`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBookingsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

/// Request payload for `PATCH /api/bookings/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Request payload for `POST /api/bookings/{id}/cancel`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelBookingRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Request payload for placing a temporary hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub boat_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub guests: u32,
}

/// Request payload for turning a hold into a booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmReservationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Method-specific payment fields as submitted by the client.
///
/// Every field is optional on the wire; which ones are required depends on
/// the payment method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetailsInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_code: Option<String>,
    #[serde(
        default,
        alias = "binancePayId",
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_id: Option<String>,
}

/// Request payload for `POST /api/payments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentRequest {
    pub booking_id: Uuid,
    pub amount_cents: i64,
    pub method: PaymentMethod,
    #[serde(default)]
    pub details: PaymentDetailsInput,
}

/// Request payload for reviewing a boat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_boat_request_applies_only_present_fields() {
        let mut boat = Boat::new(Uuid::new_v4(), "Lola", BoatType::Yacht, "Caracas", 8, 90_000);

        UpdateBoatRequest::new()
            .with_price(75_000)
            .with_available(false)
            .apply_to(&mut boat);

        assert_eq!(boat.name, "Lola");
        assert_eq!(boat.price_per_day_cents, 75_000);
        assert!(!boat.available);
    }

    #[test]
    fn test_create_boat_request_trims_text() {
        let boat = CreateBoatRequest::new("  Lola ", BoatType::Yacht, " Puerto La Cruz ", 8, 90_000)
            .with_description("Yate de lujo")
            .into_boat(Uuid::nil());

        assert_eq!(boat.name, "Lola");
        assert_eq!(boat.location, "Puerto La Cruz");
        assert_eq!(boat.description.as_deref(), Some("Yate de lujo"));
        assert!(boat.available);
    }

    #[test]
    fn test_boat_search_treats_empty_strings_as_absent() {
        let json = r#"{"q": "", "location": "  ", "startDate": "", "boatType": "catamaran"}"#;
        let search: BoatSearch = serde_json::from_str(json).unwrap();

        assert_eq!(search.q, None);
        assert_eq!(search.location, None);
        assert_eq!(search.start_date, None);
        assert_eq!(search.boat_type, Some(BoatType::Catamaran));
    }

    #[test]
    fn test_payment_details_accepts_binance_pay_id_alias() {
        let json = r#"{
            "bookingId": "00000000-0000-0000-0000-000000000001",
            "amountCents": 1000,
            "method": "binance",
            "details": {"binancePayId": "BP-778"}
        }"#;
        let request: ProcessPaymentRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.method, PaymentMethod::Binance);
        assert_eq!(request.details.transaction_id.as_deref(), Some("BP-778"));
    }
}
