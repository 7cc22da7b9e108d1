use boatrent_core::auth::parse_duration;
use chrono::Duration;

use crate::error::AuthError;

const DEFAULT_JWT_SECRET: &str = "dev-secret-change-me";

/// Token and hashing configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Configuration with the given secret and default lifetimes.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            access_ttl: Duration::hours(24),
            refresh_ttl: Duration::days(7),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Lowers the bcrypt cost so tests stay fast.
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `JWT_SECRET`: HMAC secret (default: a development secret, with a warning)
    /// - `JWT_EXPIRES_IN`: access token lifetime, e.g. `24h` (default: `24h`)
    /// - `JWT_REFRESH_EXPIRES_IN`: refresh token lifetime (default: `7d`)
    /// - `BCRYPT_COST`: bcrypt work factor, 4..=31 (default: 10)
    ///
    /// # Errors
    ///
    /// Returns an error if a lifetime cannot be parsed.
    pub fn from_env() -> Result<Self, AuthError> {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let access_ttl = parse_duration(
            &std::env::var("JWT_EXPIRES_IN").unwrap_or_else(|_| "24h".to_string()),
        )?;
        let refresh_ttl = parse_duration(
            &std::env::var("JWT_REFRESH_EXPIRES_IN").unwrap_or_else(|_| "7d".to_string()),
        )?;

        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|cost| (4..=31).contains(cost))
            .unwrap_or(bcrypt::DEFAULT_COST);

        Ok(Self {
            jwt_secret,
            access_ttl,
            refresh_ttl,
            bcrypt_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_lifetimes() {
        let config = AuthConfig::new("secret");

        assert_eq!(config.access_ttl, Duration::hours(24));
        assert_eq!(config.refresh_ttl, Duration::days(7));
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
    }

    #[test]
    fn with_bcrypt_cost_overrides() {
        let config = AuthConfig::new("secret").with_bcrypt_cost(4);
        assert_eq!(config.bcrypt_cost, 4);
    }
}
