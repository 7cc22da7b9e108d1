//! Client error types.

use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Unauthorized: {message} (set --token or BOATRENT_TOKEN)")]
    Unauthorized { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Builds the error for a non-success response from its status and body.
    ///
    /// The server answers `{"error": "..."}`; anything else is passed through.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.to_string());

        match status {
            401 => ClientError::Unauthorized { message },
            404 => ClientError::NotFound { message },
            _ => ClientError::ServerError { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_server_message() {
        let error = ClientError::from_response(409, r#"{"error": "La reserva ya está pagada"}"#);
        assert_eq!(
            error.to_string(),
            "Server returned 409: La reserva ya está pagada"
        );
    }

    #[test]
    fn maps_not_found_and_unauthorized() {
        assert!(matches!(
            ClientError::from_response(404, r#"{"error": "Embarcación no encontrada"}"#),
            ClientError::NotFound { .. }
        ));
        assert!(matches!(
            ClientError::from_response(401, "nope"),
            ClientError::Unauthorized { message } if message == "nope"
        ));
    }
}
