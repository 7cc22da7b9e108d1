use async_trait::async_trait;
use uuid::Uuid;

use crate::rental::{
    Boat, Booking, Notification, Payment, Reservation, Review, User,
};

use super::Result;

/// Repository for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets a user by their ID.
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Gets a user by their (normalized) email address.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Creates a new user. Fails with `AlreadyExists` if the email is taken.
    async fn create_user(&self, user: &User) -> Result<()>;

    /// Updates an existing user.
    async fn update_user(&self, user: &User) -> Result<()>;
}

/// Repository for boats.
#[async_trait]
pub trait BoatRepository: Send + Sync {
    async fn get_boat(&self, id: Uuid) -> Result<Option<Boat>>;

    /// Lists all boats, optionally only those of one owner.
    async fn list_boats(&self, owner_id: Option<Uuid>) -> Result<Vec<Boat>>;

    async fn create_boat(&self, boat: &Boat) -> Result<()>;

    async fn update_boat(&self, boat: &Boat) -> Result<()>;

    async fn delete_boat(&self, id: Uuid) -> Result<()>;
}

/// Repository for bookings.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>>;

    async fn list_bookings_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>>;

    async fn list_bookings_by_boat(&self, boat_id: Uuid) -> Result<Vec<Booking>>;

    async fn create_booking(&self, booking: &Booking) -> Result<()>;

    /// Overwrites an existing booking.
    async fn update_booking(&self, booking: &Booking) -> Result<()>;

    /// Overwrites the booking only if its stored status and payment status
    /// still match `expected`, the copy the caller read.
    ///
    /// Returns `Conflict` when another writer changed either one first.
    async fn update_booking_if_unchanged(&self, booking: &Booking, expected: &Booking)
        -> Result<()>;
}

/// Repository for temporary holds.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn get_reservation(&self, id: Uuid) -> Result<Option<Reservation>>;

    /// Lists holds on a boat. Expired holds may still be listed until purged.
    async fn list_reservations_by_boat(&self, boat_id: Uuid) -> Result<Vec<Reservation>>;

    async fn create_reservation(&self, reservation: &Reservation) -> Result<()>;

    async fn delete_reservation(&self, id: Uuid) -> Result<()>;
}

/// Repository for payments.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn get_payment(&self, id: Uuid) -> Result<Option<Payment>>;

    async fn list_payments_by_booking(&self, booking_id: Uuid) -> Result<Vec<Payment>>;

    async fn create_payment(&self, payment: &Payment) -> Result<()>;

    async fn update_payment(&self, payment: &Payment) -> Result<()>;
}

/// Repository for boat reviews.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn list_reviews_by_boat(&self, boat_id: Uuid) -> Result<Vec<Review>>;

    async fn create_review(&self, review: &Review) -> Result<()>;
}

/// Repository for user notifications.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Lists a user's notifications, newest first.
    async fn list_notifications_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>>;

    async fn create_notification(&self, notification: &Notification) -> Result<()>;

    /// Marks a notification read and returns it.
    async fn mark_notification_read(&self, id: Uuid) -> Result<Notification>;
}
