//! HS256 access and refresh tokens.

use boatrent_core::auth::{build_claims, is_token_expired, AuthError as CoreError, Claims, TokenPair, TokenType};
use boatrent_core::rental::User;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Issues and verifies signed tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        }
    }

    /// Signs a single token of `token_type` for `user`.
    pub fn issue(
        &self,
        user: &User,
        token_type: TokenType,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };
        let claims = build_claims(user, token_type, now, ttl);
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Signs a fresh access/refresh pair.
    pub fn issue_pair(&self, user: &User, now: DateTime<Utc>) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            token: self.issue(user, TokenType::Access, now)?,
            refresh_token: self.issue(user, TokenType::Refresh, now)?,
        })
    }

    /// Verifies signature, expiry, and token type.
    ///
    /// Any failure is reported as the core `InvalidToken`, or
    /// `InvalidRefreshToken` when a refresh token was expected.
    pub fn verify(
        &self,
        token: &str,
        expected: TokenType,
        now: DateTime<Utc>,
    ) -> Result<Claims, AuthError> {
        let rejected = match expected {
            TokenType::Access => CoreError::InvalidToken,
            TokenType::Refresh => CoreError::InvalidRefreshToken,
        };

        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                rejected.clone()
            })?
            .claims;

        if claims.token_type != expected || is_token_expired(&claims, now) {
            return Err(rejected.into());
        }
        Ok(claims)
    }
}
