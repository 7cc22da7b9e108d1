use std::env;

use anyhow::Context;
use boatrent_auth::AuthConfig;
use chrono::Duration;

/// DynamoDB table name per entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub users: String,
    pub boats: String,
    pub bookings: String,
    pub reservations: String,
    pub payments: String,
    pub reviews: String,
    pub notifications: String,
}

impl TableNames {
    /// Read `DYNAMODB_TABLE_*` overrides, falling back to `boatrent-<entity>`.
    pub fn from_env() -> Self {
        let table = |var: &str, default: &str| env::var(var).unwrap_or_else(|_| default.to_string());
        Self {
            users: table("DYNAMODB_TABLE_USERS", "boatrent-users"),
            boats: table("DYNAMODB_TABLE_BOATS", "boatrent-boats"),
            bookings: table("DYNAMODB_TABLE_BOOKINGS", "boatrent-bookings"),
            reservations: table("DYNAMODB_TABLE_RESERVATIONS", "boatrent-reservations"),
            payments: table("DYNAMODB_TABLE_PAYMENTS", "boatrent-payments"),
            reviews: table("DYNAMODB_TABLE_REVIEWS", "boatrent-reviews"),
            notifications: table("DYNAMODB_TABLE_NOTIFICATIONS", "boatrent-notifications"),
        }
    }
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            users: "boatrent-users".to_string(),
            boats: "boatrent-boats".to_string(),
            bookings: "boatrent-bookings".to_string(),
            reservations: "boatrent-reservations".to_string(),
            payments: "boatrent-payments".to_string(),
            reviews: "boatrent-reviews".to_string(),
            notifications: "boatrent-notifications".to_string(),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// How long a reservation hold blocks other users (default: 30)
    pub reservation_ttl_minutes: i64,
    /// DynamoDB tables.
    /// Note: Only read when the `dynamodb` feature is enabled.
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub tables: TableNames,
    /// Token lifetimes, secret and bcrypt cost.
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RESERVATION_TTL_MINUTES` - Reservation hold lifetime (default: 30)
    /// - `DYNAMODB_TABLE_*` - Table names (default: `boatrent-<entity>`)
    /// - `JWT_SECRET`, `JWT_EXPIRES_IN`, `JWT_REFRESH_EXPIRES_IN`, `BCRYPT_COST` -
    ///   see [`AuthConfig::from_env`]
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            reservation_ttl_minutes: env::var("RESERVATION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|minutes| *minutes > 0)
                .unwrap_or(30),
            tables: TableNames::from_env(),
            auth: AuthConfig::from_env().context("Invalid auth configuration")?,
        })
    }

    /// Get the reservation hold lifetime as a Duration.
    pub fn reservation_ttl(&self) -> Duration {
        Duration::minutes(self.reservation_ttl_minutes)
    }
}

impl Default for Config {
    /// Development defaults, ignoring the environment.
    fn default() -> Self {
        Self {
            reservation_ttl_minutes: 30,
            tables: TableNames::default(),
            auth: AuthConfig::new("dev-secret-change-me"),
        }
    }
}
