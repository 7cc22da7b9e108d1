//! Axum extractors for authentication.

use axum::{
    extract::{FromRef, FromRequest, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use boatrent_core::auth::{AuthError as CoreError, TokenType};
use boatrent_core::rental::User;
use chrono::Utc;

use crate::error::AuthError;
use crate::AuthState;

/// Extractor for the authenticated user. Rejects with 401 if the bearer
/// token is missing, invalid, or points at a deleted user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(CoreError::MissingToken)?
        .to_str()
        .map_err(|_| CoreError::InvalidToken)?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| CoreError::MissingToken.into())
}

impl<S> FromRequestParts<S> for CurrentUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let token = bearer_token(parts)?;
        let claims = auth_state
            .tokens
            .verify(token, TokenType::Access, Utc::now())?;

        let user = auth_state
            .users
            .get_user(claims.sub)
            .await?
            .ok_or(CoreError::UserNotFound)?;

        Ok(CurrentUser(user))
    }
}

/// JSON body extractor whose rejection is a 400 with the usual error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AuthError))]
pub struct AuthJson<T>(pub T);
