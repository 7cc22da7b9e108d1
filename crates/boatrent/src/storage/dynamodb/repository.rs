//! DynamoDB repository implementation.
//!
//! Implements the repository traits from `boatrent_core::storage` using one
//! DynamoDB table per entity.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use uuid::Uuid;

use boatrent_core::rental::{
    Boat, Booking, Notification, Payment, Reservation, Review, User,
};
use boatrent_core::storage::{
    BoatRepository, BookingRepository, NotificationRepository, PaymentRepository,
    RepositoryError, ReservationRepository, Result, ReviewRepository, UserRepository,
};

use super::conversions::{
    boat_to_item, booking_to_item, item_to_boat, item_to_booking, item_to_notification,
    item_to_payment, item_to_reservation, item_to_review, item_to_user, notification_to_item,
    payment_to_item, reservation_to_item, review_to_item, user_to_item, Item,
};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_query_error,
    map_scan_error, map_update_item_error, WriteKind,
};
use super::keys::{self, Index};
use crate::config::TableNames;

/// DynamoDB-based repository implementation.
///
/// Provides async access to DynamoDB storage for all entity types.
#[derive(Debug, Clone)]
pub struct DynamoDbRepository {
    client: Client,
    tables: TableNames,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table names.
    pub fn new(client: Client, tables: TableNames) -> Self {
        Self { client, tables }
    }

    /// Creates a new repository from the AWS default configuration chain.
    ///
    /// `AWS_ENDPOINT_URL` points the client at DynamoDB Local when set.
    pub async fn from_env(tables: TableNames) -> Result<Self> {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Ok(Self::new(Client::new(&config), tables))
    }

    async fn get(&self, table: &str, id: Uuid) -> Result<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(table)
            .key(keys::ID, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(map_get_item_error)?;

        Ok(result.item)
    }

    async fn put(
        &self,
        table: &str,
        item: Item,
        kind: WriteKind,
        entity_type: &'static str,
        id: Uuid,
    ) -> Result<()> {
        let condition = match kind {
            WriteKind::Create => keys::CREATE_CONDITION,
            WriteKind::Update | WriteKind::Conditional => keys::UPDATE_CONDITION,
        };

        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .condition_expression(condition)
            .send()
            .await
            .map_err(|e| map_put_item_error(e, kind, entity_type, id.to_string()))?;

        Ok(())
    }

    async fn delete(&self, table: &str, entity_type: &'static str, id: Uuid) -> Result<()> {
        self.client
            .delete_item()
            .table_name(table)
            .key(keys::ID, AttributeValue::S(id.to_string()))
            .condition_expression(keys::UPDATE_CONDITION)
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, entity_type, id.to_string()))?;

        Ok(())
    }

    /// Query a GSI for every item with `index.attribute = value`, following pagination.
    async fn query_index(&self, table: &str, index: Index, value: String) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        let mut start_key = None;

        loop {
            let result = self
                .client
                .query()
                .table_name(table)
                .index_name(index.name)
                .key_condition_expression("#k = :v")
                .expression_attribute_names("#k", index.attribute)
                .expression_attribute_values(":v", AttributeValue::S(value.clone()))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_query_error)?;

            items.extend(result.items.unwrap_or_default());
            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(items)
    }

    async fn scan_all(&self, table: &str) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        let mut start_key = None;

        loop {
            let result = self
                .client
                .scan()
                .table_name(table)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_scan_error)?;

            items.extend(result.items.unwrap_or_default());
            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(items)
    }
}

fn convert_all<T>(items: &[Item], f: fn(&Item) -> Result<T>) -> Result<Vec<T>> {
    items.iter().map(f).collect()
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for DynamoDbRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        self.get(&self.tables.users, id)
            .await?
            .as_ref()
            .map(item_to_user)
            .transpose()
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let items = self
            .query_index(&self.tables.users, keys::BY_EMAIL, email.to_string())
            .await?;

        items.first().map(item_to_user).transpose()
    }

    /// Email uniqueness is checked with a GSI read before the write; the
    /// table itself only guards the id.
    async fn create_user(&self, user: &User) -> Result<()> {
        if self.get_user_by_email(&user.email).await?.is_some() {
            return Err(RepositoryError::already_exists("User", &user.email));
        }
        self.put(
            &self.tables.users,
            user_to_item(user),
            WriteKind::Create,
            "User",
            user.id,
        )
        .await
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        self.put(
            &self.tables.users,
            user_to_item(user),
            WriteKind::Update,
            "User",
            user.id,
        )
        .await
    }
}

// ============================================================================
// BoatRepository implementation
// ============================================================================

#[async_trait]
impl BoatRepository for DynamoDbRepository {
    async fn get_boat(&self, id: Uuid) -> Result<Option<Boat>> {
        self.get(&self.tables.boats, id)
            .await?
            .as_ref()
            .map(item_to_boat)
            .transpose()
    }

    async fn list_boats(&self, owner_id: Option<Uuid>) -> Result<Vec<Boat>> {
        let items = self.scan_all(&self.tables.boats).await?;
        let mut boats: Vec<Boat> = convert_all(&items, item_to_boat)?
            .into_iter()
            .filter(|b| owner_id.is_none_or(|owner| b.owner_id == owner))
            .collect();
        boats.sort_by_key(|b| b.created_at);
        Ok(boats)
    }

    async fn create_boat(&self, boat: &Boat) -> Result<()> {
        self.put(
            &self.tables.boats,
            boat_to_item(boat),
            WriteKind::Create,
            "Boat",
            boat.id,
        )
        .await
    }

    async fn update_boat(&self, boat: &Boat) -> Result<()> {
        self.put(
            &self.tables.boats,
            boat_to_item(boat),
            WriteKind::Update,
            "Boat",
            boat.id,
        )
        .await
    }

    async fn delete_boat(&self, id: Uuid) -> Result<()> {
        self.delete(&self.tables.boats, "Boat", id).await
    }
}

// ============================================================================
// BookingRepository implementation
// ============================================================================

#[async_trait]
impl BookingRepository for DynamoDbRepository {
    async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>> {
        self.get(&self.tables.bookings, id)
            .await?
            .as_ref()
            .map(item_to_booking)
            .transpose()
    }

    async fn list_bookings_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>> {
        let items = self
            .query_index(&self.tables.bookings, keys::BY_USER, user_id.to_string())
            .await?;
        let mut bookings = convert_all(&items, item_to_booking)?;
        bookings.sort_by_key(|b| b.created_at);
        Ok(bookings)
    }

    async fn list_bookings_by_boat(&self, boat_id: Uuid) -> Result<Vec<Booking>> {
        let items = self
            .query_index(&self.tables.bookings, keys::BY_BOAT, boat_id.to_string())
            .await?;
        let mut bookings = convert_all(&items, item_to_booking)?;
        bookings.sort_by_key(|b| b.start_date);
        Ok(bookings)
    }

    async fn create_booking(&self, booking: &Booking) -> Result<()> {
        self.put(
            &self.tables.bookings,
            booking_to_item(booking),
            WriteKind::Create,
            "Booking",
            booking.id,
        )
        .await
    }

    async fn update_booking(&self, booking: &Booking) -> Result<()> {
        self.put(
            &self.tables.bookings,
            booking_to_item(booking),
            WriteKind::Update,
            "Booking",
            booking.id,
        )
        .await
    }

    async fn update_booking_if_unchanged(
        &self,
        booking: &Booking,
        expected: &Booking,
    ) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.tables.bookings)
            .set_item(Some(booking_to_item(booking)))
            .condition_expression(keys::STATUS_CONDITION)
            .expression_attribute_names("#status", "status")
            .expression_attribute_names("#paymentStatus", "paymentStatus")
            .expression_attribute_values(
                ":status",
                AttributeValue::S(expected.status.as_str().into()),
            )
            .expression_attribute_values(
                ":paymentStatus",
                AttributeValue::S(expected.payment_status.as_str().into()),
            )
            .send()
            .await
            .map_err(|e| {
                map_put_item_error(e, WriteKind::Conditional, "Booking", booking.id.to_string())
            })?;

        Ok(())
    }
}

// ============================================================================
// ReservationRepository implementation
// ============================================================================

#[async_trait]
impl ReservationRepository for DynamoDbRepository {
    async fn get_reservation(&self, id: Uuid) -> Result<Option<Reservation>> {
        self.get(&self.tables.reservations, id)
            .await?
            .as_ref()
            .map(item_to_reservation)
            .transpose()
    }

    async fn list_reservations_by_boat(&self, boat_id: Uuid) -> Result<Vec<Reservation>> {
        let items = self
            .query_index(&self.tables.reservations, keys::BY_BOAT, boat_id.to_string())
            .await?;
        let mut reservations = convert_all(&items, item_to_reservation)?;
        reservations.sort_by_key(|r| r.created_at);
        Ok(reservations)
    }

    async fn create_reservation(&self, reservation: &Reservation) -> Result<()> {
        self.put(
            &self.tables.reservations,
            reservation_to_item(reservation),
            WriteKind::Create,
            "Reservation",
            reservation.id,
        )
        .await
    }

    async fn delete_reservation(&self, id: Uuid) -> Result<()> {
        self.delete(&self.tables.reservations, "Reservation", id)
            .await
    }
}

// ============================================================================
// PaymentRepository implementation
// ============================================================================

#[async_trait]
impl PaymentRepository for DynamoDbRepository {
    async fn get_payment(&self, id: Uuid) -> Result<Option<Payment>> {
        self.get(&self.tables.payments, id)
            .await?
            .as_ref()
            .map(item_to_payment)
            .transpose()
    }

    async fn list_payments_by_booking(&self, booking_id: Uuid) -> Result<Vec<Payment>> {
        let items = self
            .query_index(&self.tables.payments, keys::BY_BOOKING, booking_id.to_string())
            .await?;
        let mut payments = convert_all(&items, item_to_payment)?;
        payments.sort_by_key(|p| p.created_at);
        Ok(payments)
    }

    async fn create_payment(&self, payment: &Payment) -> Result<()> {
        self.put(
            &self.tables.payments,
            payment_to_item(payment)?,
            WriteKind::Create,
            "Payment",
            payment.id,
        )
        .await
    }

    async fn update_payment(&self, payment: &Payment) -> Result<()> {
        self.put(
            &self.tables.payments,
            payment_to_item(payment)?,
            WriteKind::Update,
            "Payment",
            payment.id,
        )
        .await
    }
}

// ============================================================================
// ReviewRepository implementation
// ============================================================================

#[async_trait]
impl ReviewRepository for DynamoDbRepository {
    async fn list_reviews_by_boat(&self, boat_id: Uuid) -> Result<Vec<Review>> {
        let items = self
            .query_index(&self.tables.reviews, keys::BY_BOAT, boat_id.to_string())
            .await?;
        let mut reviews = convert_all(&items, item_to_review)?;
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn create_review(&self, review: &Review) -> Result<()> {
        self.put(
            &self.tables.reviews,
            review_to_item(review),
            WriteKind::Create,
            "Review",
            review.id,
        )
        .await
    }
}

// ============================================================================
// NotificationRepository implementation
// ============================================================================

#[async_trait]
impl NotificationRepository for DynamoDbRepository {
    async fn list_notifications_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        let items = self
            .query_index(&self.tables.notifications, keys::BY_USER, user_id.to_string())
            .await?;
        let mut notifications = convert_all(&items, item_to_notification)?;
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    async fn create_notification(&self, notification: &Notification) -> Result<()> {
        self.put(
            &self.tables.notifications,
            notification_to_item(notification),
            WriteKind::Create,
            "Notification",
            notification.id,
        )
        .await
    }

    async fn mark_notification_read(&self, id: Uuid) -> Result<Notification> {
        let result = self
            .client
            .update_item()
            .table_name(&self.tables.notifications)
            .key(keys::ID, AttributeValue::S(id.to_string()))
            .update_expression("SET #read = :read")
            .condition_expression(keys::UPDATE_CONDITION)
            .expression_attribute_names("#read", "read")
            .expression_attribute_values(":read", AttributeValue::Bool(true))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, "Notification", id.to_string()))?;

        let item = result
            .attributes
            .ok_or_else(|| RepositoryError::not_found("Notification", id))?;
        item_to_notification(&item)
    }
}
