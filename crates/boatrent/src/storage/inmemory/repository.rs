//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use boatrent_core::rental::{
    Boat, Booking, Notification, Payment, Reservation, Review, User,
};
use boatrent_core::storage::{
    BoatRepository, BookingRepository, NotificationRepository, PaymentRepository,
    RepositoryError, ReservationRepository, Result, ReviewRepository, UserRepository,
};

/// In-memory storage backend.
///
/// Uses HashMaps wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    boats: Arc<RwLock<HashMap<Uuid, Boat>>>,
    bookings: Arc<RwLock<HashMap<Uuid, Booking>>>,
    reservations: Arc<RwLock<HashMap<Uuid, Reservation>>>,
    payments: Arc<RwLock<HashMap<Uuid, Payment>>>,
    reviews: Arc<RwLock<HashMap<Uuid, Review>>>,
    notifications: Arc<RwLock<HashMap<Uuid, Notification>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn insert_new<T: Clone>(
    map: &mut HashMap<Uuid, T>,
    id: Uuid,
    value: &T,
    entity_type: &'static str,
) -> Result<()> {
    if map.contains_key(&id) {
        return Err(RepositoryError::already_exists(entity_type, id));
    }
    map.insert(id, value.clone());
    Ok(())
}

fn replace_existing<T: Clone>(
    map: &mut HashMap<Uuid, T>,
    id: Uuid,
    value: &T,
    entity_type: &'static str,
) -> Result<()> {
    match map.get_mut(&id) {
        Some(slot) => {
            *slot = value.clone();
            Ok(())
        }
        None => Err(RepositoryError::not_found(entity_type, id)),
    }
}

/// Sorts by creation time so listings are stable across calls.
fn sorted_by<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by_key(key);
    items
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::already_exists("User", &user.email));
        }
        insert_new(&mut users, user.id, user, "User")
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        replace_existing(&mut users, user.id, user, "User")
    }
}

#[async_trait]
impl BoatRepository for InMemoryRepository {
    async fn get_boat(&self, id: Uuid) -> Result<Option<Boat>> {
        let boats = self.boats.read().await;
        Ok(boats.get(&id).cloned())
    }

    async fn list_boats(&self, owner_id: Option<Uuid>) -> Result<Vec<Boat>> {
        let boats = self.boats.read().await;
        let found = boats
            .values()
            .filter(|b| owner_id.is_none_or(|owner| b.owner_id == owner))
            .cloned()
            .collect();
        Ok(sorted_by(found, |b: &Boat| b.created_at))
    }

    async fn create_boat(&self, boat: &Boat) -> Result<()> {
        let mut boats = self.boats.write().await;
        insert_new(&mut boats, boat.id, boat, "Boat")
    }

    async fn update_boat(&self, boat: &Boat) -> Result<()> {
        let mut boats = self.boats.write().await;
        replace_existing(&mut boats, boat.id, boat, "Boat")
    }

    async fn delete_boat(&self, id: Uuid) -> Result<()> {
        let mut boats = self.boats.write().await;
        if boats.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Boat", id));
        }
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for InMemoryRepository {
    async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.get(&id).cloned())
    }

    async fn list_bookings_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        let found = bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        Ok(sorted_by(found, |b: &Booking| b.created_at))
    }

    async fn list_bookings_by_boat(&self, boat_id: Uuid) -> Result<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        let found = bookings
            .values()
            .filter(|b| b.boat_id == boat_id)
            .cloned()
            .collect();
        Ok(sorted_by(found, |b: &Booking| b.start_date))
    }

    async fn create_booking(&self, booking: &Booking) -> Result<()> {
        let mut bookings = self.bookings.write().await;
        insert_new(&mut bookings, booking.id, booking, "Booking")
    }

    async fn update_booking(&self, booking: &Booking) -> Result<()> {
        let mut bookings = self.bookings.write().await;
        replace_existing(&mut bookings, booking.id, booking, "Booking")
    }

    async fn update_booking_if_unchanged(
        &self,
        booking: &Booking,
        expected: &Booking,
    ) -> Result<()> {
        let mut bookings = self.bookings.write().await;
        match bookings.get_mut(&booking.id) {
            Some(stored)
                if stored.status == expected.status
                    && stored.payment_status == expected.payment_status =>
            {
                *stored = booking.clone();
                Ok(())
            }
            Some(_) => Err(RepositoryError::conflict("Booking", booking.id)),
            None => Err(RepositoryError::not_found("Booking", booking.id)),
        }
    }
}

#[async_trait]
impl ReservationRepository for InMemoryRepository {
    async fn get_reservation(&self, id: Uuid) -> Result<Option<Reservation>> {
        let reservations = self.reservations.read().await;
        Ok(reservations.get(&id).cloned())
    }

    async fn list_reservations_by_boat(&self, boat_id: Uuid) -> Result<Vec<Reservation>> {
        let reservations = self.reservations.read().await;
        let found = reservations
            .values()
            .filter(|r| r.boat_id == boat_id)
            .cloned()
            .collect();
        Ok(sorted_by(found, |r: &Reservation| r.created_at))
    }

    /// Also drops expired holds, standing in for the DynamoDB TTL.
    async fn create_reservation(&self, reservation: &Reservation) -> Result<()> {
        let mut reservations = self.reservations.write().await;
        let now = Utc::now();
        reservations.retain(|_, r| r.is_live(now));
        insert_new(&mut reservations, reservation.id, reservation, "Reservation")
    }

    async fn delete_reservation(&self, id: Uuid) -> Result<()> {
        let mut reservations = self.reservations.write().await;
        if reservations.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Reservation", id));
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentRepository for InMemoryRepository {
    async fn get_payment(&self, id: Uuid) -> Result<Option<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.get(&id).cloned())
    }

    async fn list_payments_by_booking(&self, booking_id: Uuid) -> Result<Vec<Payment>> {
        let payments = self.payments.read().await;
        let found = payments
            .values()
            .filter(|p| p.booking_id == booking_id)
            .cloned()
            .collect();
        Ok(sorted_by(found, |p: &Payment| p.created_at))
    }

    async fn create_payment(&self, payment: &Payment) -> Result<()> {
        let mut payments = self.payments.write().await;
        insert_new(&mut payments, payment.id, payment, "Payment")
    }

    async fn update_payment(&self, payment: &Payment) -> Result<()> {
        let mut payments = self.payments.write().await;
        replace_existing(&mut payments, payment.id, payment, "Payment")
    }
}

#[async_trait]
impl ReviewRepository for InMemoryRepository {
    async fn list_reviews_by_boat(&self, boat_id: Uuid) -> Result<Vec<Review>> {
        let reviews = self.reviews.read().await;
        let found = reviews
            .values()
            .filter(|r| r.boat_id == boat_id)
            .cloned()
            .collect();
        Ok(sorted_by(found, |r: &Review| std::cmp::Reverse(r.created_at)))
    }

    async fn create_review(&self, review: &Review) -> Result<()> {
        let mut reviews = self.reviews.write().await;
        insert_new(&mut reviews, review.id, review, "Review")
    }
}

#[async_trait]
impl NotificationRepository for InMemoryRepository {
    async fn list_notifications_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        let notifications = self.notifications.read().await;
        let found = notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        Ok(sorted_by(found, |n: &Notification| std::cmp::Reverse(n.created_at)))
    }

    async fn create_notification(&self, notification: &Notification) -> Result<()> {
        let mut notifications = self.notifications.write().await;
        insert_new(&mut notifications, notification.id, notification, "Notification")
    }

    async fn mark_notification_read(&self, id: Uuid) -> Result<Notification> {
        let mut notifications = self.notifications.write().await;
        let notification = notifications
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("Notification", id))?;
        notification.read = true;
        Ok(notification.clone())
    }
}
