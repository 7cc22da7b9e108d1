use thiserror::Error;

/// Authentication failures. Display strings are the user-facing messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("El correo electrónico ya está registrado")]
    EmailTaken,

    #[error("Credenciales inválidas")]
    InvalidCredentials,

    #[error("Token de autenticación requerido")]
    MissingToken,

    #[error("Token inválido o expirado")]
    InvalidToken,

    #[error("Token de actualización inválido")]
    InvalidRefreshToken,

    #[error("El usuario ya no existe")]
    UserNotFound,

    #[error("Duración inválida: {0}")]
    InvalidDuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            AuthError::EmailTaken.to_string(),
            "El correo electrónico ya está registrado"
        );
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Credenciales inválidas");
        assert_eq!(
            AuthError::InvalidDuration("7w".to_string()).to_string(),
            "Duración inválida: 7w"
        );
    }
}
