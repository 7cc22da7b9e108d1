use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{FromRequest, FromRequestParts},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use boatrent_core::rental::{AvailabilityError, PaymentError, StatusError, ValidationError};
use boatrent_core::storage::{repository_error_to_status_code, RepositoryError};
use serde_json::json;
use thiserror::Error;

/// Handler error type.
///
/// `Display` is the message sent to the client, except for `Internal`,
/// which is logged and replaced with a generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "Application error");
                "Error interno del servidor".to_string()
            }
            other => {
                tracing::warn!(error = %other, status = status.as_u16(), "Request rejected");
                other.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Spanish name of a stored entity, for not-found messages.
fn entity_label(entity_type: &str) -> &'static str {
    match entity_type {
        "User" => "Usuario no encontrado",
        "Boat" => "Embarcación no encontrada",
        "Booking" => "Reserva no encontrada",
        "Reservation" => "Retención no encontrada",
        "Payment" => "Pago no encontrado",
        "Review" => "Reseña no encontrada",
        "Notification" => "Notificación no encontrada",
        _ => "Recurso no encontrado",
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let status = repository_error_to_status_code(&err);
        match err {
            RepositoryError::NotFound { entity_type, .. } => {
                ApiError::not_found(entity_label(entity_type))
            }
            RepositoryError::Conflict { .. } => ApiError::conflict(
                "El recurso fue modificado por otra solicitud, inténtalo de nuevo",
            ),
            _ if status == 409 => ApiError::conflict("El recurso ya existe"),
            other if status == 503 => {
                tracing::error!(error = %other, "Storage unavailable");
                ApiError::ServiceUnavailable("Servicio no disponible temporalmente".to_string())
            }
            other => ApiError::Internal(other.into()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<AvailabilityError> for ApiError {
    fn from(err: AvailabilityError) -> Self {
        ApiError::conflict(err.to_string())
    }
}

impl From<StatusError> for ApiError {
    fn from(err: StatusError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        if err.is_conflict() {
            ApiError::conflict(err.to_string())
        } else {
            ApiError::bad_request(err.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(format!("Solicitud inválida: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(format!("Parámetros inválidos: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(format!("Ruta inválida: {}", rejection.body_text()))
    }
}

/// JSON body extractor that rejects with [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor that rejects with [`ApiError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Path extractor that rejects with [`ApiError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
