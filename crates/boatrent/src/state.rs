//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It holds repository trait objects for storage abstraction,
//! backed by whichever storage feature is enabled.

use std::sync::Arc;

use boatrent_auth::AuthState;
use boatrent_core::rental::Notification;
use boatrent_core::storage::{
    BoatRepository, BookingRepository, NotificationRepository, PaymentRepository,
    ReservationRepository, ReviewRepository, UserRepository,
};
use chrono::Duration;
use tokio::sync::Mutex;

use crate::config::Config;

/// Shared application state.
///
/// Cloned for each request handler. Every repository field usually points
/// at the same backend instance.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub boats: Arc<dyn BoatRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub reservations: Arc<dyn ReservationRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    /// Token service and user lookup for the auth routes and extractor.
    pub auth: AuthState,
    /// How long a reservation hold lasts.
    pub reservation_ttl: Duration,
    /// Serializes check-then-insert of bookings and holds within this process.
    pub booking_guard: Arc<Mutex<()>>,
}

impl AppState {
    /// Builds the state around a single backend that implements every repository.
    pub fn from_repository<R>(repo: Arc<R>, config: &Config) -> Self
    where
        R: UserRepository
            + BoatRepository
            + BookingRepository
            + ReservationRepository
            + PaymentRepository
            + ReviewRepository
            + NotificationRepository
            + 'static,
    {
        Self {
            users: repo.clone(),
            boats: repo.clone(),
            bookings: repo.clone(),
            reservations: repo.clone(),
            payments: repo.clone(),
            reviews: repo.clone(),
            notifications: repo.clone(),
            auth: AuthState::new(repo, config.auth.clone()),
            reservation_ttl: config.reservation_ttl(),
            booking_guard: Arc::new(Mutex::new(())),
        }
    }

    /// Stores a notification without failing the calling request.
    ///
    /// Notifications are a side effect of the main write; a failure here is
    /// logged and swallowed.
    pub async fn notify(&self, notification: Notification) {
        if let Err(err) = self.notifications.create_notification(&notification).await {
            tracing::warn!(
                user_id = %notification.user_id,
                kind = notification.kind.as_str(),
                error = %err,
                "Failed to store notification"
            );
        }
    }
}

impl AsRef<AuthState> for AppState {
    fn as_ref(&self) -> &AuthState {
        &self.auth
    }
}

// ============================================================================
// Feature-specific constructors
// ============================================================================

#[cfg(feature = "inmemory")]
mod inmemory {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        pub async fn new(config: &Config) -> anyhow::Result<Self> {
            tracing::info!("Using in-memory storage; data is lost on restart");
            Ok(Self::from_repository(
                Arc::new(InMemoryRepository::new()),
                config,
            ))
        }
    }
}

#[cfg(feature = "dynamodb")]
mod dynamodb {
    use super::*;
    use crate::storage::DynamoDbRepository;

    impl AppState {
        pub async fn new(config: &Config) -> anyhow::Result<Self> {
            let repo = DynamoDbRepository::from_env(config.tables.clone()).await?;
            tracing::info!(users_table = %config.tables.users, "Using DynamoDB storage");
            Ok(Self::from_repository(Arc::new(repo), config))
        }
    }
}

#[cfg(test)]
impl Default for AppState {
    /// In-memory state with a cheap bcrypt cost.
    fn default() -> Self {
        let mut config = Config::default();
        config.auth = config.auth.with_bcrypt_cost(4);
        Self::from_repository(
            Arc::new(crate::storage::InMemoryRepository::new()),
            &config,
        )
    }
}
