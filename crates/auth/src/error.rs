use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use boatrent_core::rental::ValidationError;
use boatrent_core::storage::RepositoryError;
use serde_json::json;
use thiserror::Error;

/// Auth errors for the boatrent_auth crate.
///
/// Wraps the core `AuthError` and adds the I/O failures that can't live in
/// the functional core.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Error from the core auth module (credentials, tokens, durations).
    #[error(transparent)]
    Core(#[from] boatrent_core::auth::AuthError),

    /// Registration input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// User storage failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Signing a token failed.
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Hashing or verifying a password failed.
    #[error("password hashing error: {0}")]
    Hashing(String),

    /// The request body was not valid JSON for the endpoint.
    #[error("Solicitud inválida: {0}")]
    InvalidBody(String),
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::InvalidBody(rejection.body_text())
    }
}

impl AuthError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        use boatrent_core::auth::AuthError as CoreError;

        match self {
            AuthError::Core(CoreError::EmailTaken) => StatusCode::BAD_REQUEST,
            AuthError::Core(CoreError::InvalidDuration(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::Core(_) => StatusCode::UNAUTHORIZED,
            AuthError::Validation(_) | AuthError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AuthError::Repository(_) | AuthError::Token(_) | AuthError::Hashing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Auth error");
            "Error interno del servidor".to_string()
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Auth request rejected");
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
