use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a user account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Customer,
    Owner,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Owner => "owner",
            Role::Admin => "admin",
        }
    }

    /// Owners and admins may publish boats.
    pub fn can_manage_boats(&self) -> bool {
        matches!(self, Role::Owner | Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    /// bcrypt hash. Never leaves the server.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a generated ID.
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            name: name.into(),
            phone: None,
            role,
            password_hash: password_hash.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets a specific ID for this user (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// Kind of vessel offered for rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoatType {
    Yacht,
    Sailboat,
    Speedboat,
    Catamaran,
    Fishing,
    Pontoon,
    Jetski,
}

impl BoatType {
    pub const ALL: [BoatType; 7] = [
        BoatType::Yacht,
        BoatType::Sailboat,
        BoatType::Speedboat,
        BoatType::Catamaran,
        BoatType::Fishing,
        BoatType::Pontoon,
        BoatType::Jetski,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BoatType::Yacht => "yacht",
            BoatType::Sailboat => "sailboat",
            BoatType::Speedboat => "speedboat",
            BoatType::Catamaran => "catamaran",
            BoatType::Fishing => "fishing",
            BoatType::Pontoon => "pontoon",
            BoatType::Jetski => "jetski",
        }
    }
}

impl fmt::Display for BoatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A boat listed for rent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boat {
    pub id: Uuid,
    pub owner_id: Uuid,
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
    /// Whether the owner currently accepts bookings for this boat.
    pub available: bool,
    /// Average review rating, `None` until the first review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default)]
    pub review_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Boat {
    /// Creates a new, available boat with no reviews.
    pub fn new(
        owner_id: Uuid,
        name: impl Into<String>,
        boat_type: BoatType,
        location: impl Into<String>,
        capacity: u32,
        price_per_day_cents: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.into(),
            description: None,
            boat_type,
            location: location.into(),
            capacity,
            price_per_day_cents,
            amenities: Vec::new(),
            images: Vec::new(),
            available: true,
            rating: None,
            review_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = amenities.into_iter().map(Into::into).collect();
        self
    }

    /// Sets a specific ID for this boat (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Folds a new review rating into the running average.
    pub fn record_rating(&mut self, rating: u8) {
        let count = self.review_count as f32;
        let current = self.rating.unwrap_or(0.0);
        let next = (current * count + f32::from(rating)) / (count + 1.0);
        self.rating = Some((next * 100.0).round() / 100.0);
        self.review_count += 1;
    }
}

/// Lifecycle of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Pending and confirmed bookings hold the boat for their dates.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment state as seen from the booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted rental request for a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub boat_id: Uuid,
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
    pub guests: u32,
    pub total_price_cents: i64,
    pub status: BookingStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Creates a new pending, unpaid booking.
    pub fn new(
        user_id: Uuid,
        boat_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        guests: u32,
        total_price_cents: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            boat_id,
            start_date,
            end_date,
            guests,
            total_price_cents,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            notes: None,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// A temporary hold on a boat's dates while the user completes a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub boat_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub guests: u32,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a hold that expires `ttl` after `now`.
    pub fn new(
        user_id: Uuid,
        boat_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        guests: u32,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            boat_id,
            start_date,
            end_date,
            guests,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    /// A hold is live strictly before its expiry instant.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Supported (simulated) payment channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Zelle,
    PagoMovil,
    Binance,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Zelle => "zelle",
            PaymentMethod::PagoMovil => "pago_movil",
            PaymentMethod::Binance => "binance",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a single payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentRecordStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentRecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentRecordStatus::Pending => "pending",
            PaymentRecordStatus::Completed => "completed",
            PaymentRecordStatus::Failed => "failed",
            PaymentRecordStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentRecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method-specific data captured with a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentDetails {
    Zelle {
        email: String,
        reference: String,
    },
    PagoMovil {
        phone: String,
        #[serde(rename = "bankCode")]
        bank_code: String,
        reference: String,
    },
    Binance {
        #[serde(rename = "transactionId")]
        transaction_id: String,
    },
    Cash,
}

impl PaymentDetails {
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentDetails::Zelle { .. } => PaymentMethod::Zelle,
            PaymentDetails::PagoMovil { .. } => PaymentMethod::PagoMovil,
            PaymentDetails::Binance { .. } => PaymentMethod::Binance,
            PaymentDetails::Cash => PaymentMethod::Cash,
        }
    }

    /// The external reference the payer reported, if the channel has one.
    pub fn reference(&self) -> Option<&str> {
        match self {
            PaymentDetails::Zelle { reference, .. } | PaymentDetails::PagoMovil { reference, .. } => {
                Some(reference)
            }
            PaymentDetails::Binance { transaction_id } => Some(transaction_id),
            PaymentDetails::Cash => None,
        }
    }
}

/// A payment made against a booking.
///
/// On the wire `method` and `reference` are repeated at the top level next to
/// the method-specific `details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "PaymentWire", from = "PaymentWire")]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub amount_cents: i64,
    pub status: PaymentRecordStatus,
    pub details: PaymentDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn method(&self) -> PaymentMethod {
        self.details.method()
    }

    pub fn reference(&self) -> Option<&str> {
        self.details.reference()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentWire {
    id: Uuid,
    booking_id: Uuid,
    user_id: Uuid,
    amount_cents: i64,
    method: PaymentMethod,
    status: PaymentRecordStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference: Option<String>,
    details: PaymentDetails,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Payment> for PaymentWire {
    fn from(payment: Payment) -> Self {
        Self {
            method: payment.method(),
            reference: payment.reference().map(str::to_string),
            id: payment.id,
            booking_id: payment.booking_id,
            user_id: payment.user_id,
            amount_cents: payment.amount_cents,
            status: payment.status,
            details: payment.details,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}

// `method` and `reference` are derived from `details`.
impl From<PaymentWire> for Payment {
    fn from(wire: PaymentWire) -> Self {
        Self {
            id: wire.id,
            booking_id: wire.booking_id,
            user_id: wire.user_id,
            amount_cents: wire.amount_cents,
            status: wire.status,
            details: wire.details,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        }
    }
}

/// A rating left by a customer after a completed rental.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub boat_id: Uuid,
    pub user_id: Uuid,
    pub booking_id: Uuid,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BookingCreated,
    BookingStatusChanged,
    PaymentReceived,
    ReviewReceived,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::BookingCreated => "booking_created",
            NotificationKind::BookingStatusChanged => "booking_status_changed",
            NotificationKind::PaymentReceived => "payment_received",
            NotificationKind::ReviewReceived => "review_received",
        }
    }
}

/// An in-app message for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user_id: Uuid,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        related_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            title: title.into(),
            message: message.into(),
            read: false,
            related_id,
            created_at: Utc::now(),
        }
    }
}
