use thiserror::Error;

use super::types::BookingStatus;

/// Input validation failures. Display strings are the user-facing messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("El correo electrónico no es válido")]
    InvalidEmail,
    #[error("La contraseña debe tener al menos 8 caracteres")]
    PasswordTooShort,
    #[error("El nombre es obligatorio")]
    EmptyName,
    #[error("El nombre no puede superar los 100 caracteres")]
    NameTooLong,
    #[error("No se puede registrar una cuenta de administrador")]
    RoleNotAllowed,
    #[error("La ubicación es obligatoria")]
    EmptyLocation,
    #[error("La capacidad debe ser al menos 1")]
    InvalidCapacity,
    #[error("El precio por día debe ser mayor que cero")]
    InvalidPrice,
    #[error("La fecha de inicio debe ser anterior o igual a la fecha de fin")]
    InvalidDateRange,
    #[error("La fecha de inicio no puede estar en el pasado")]
    StartDateInPast,
    #[error("El número de huéspedes debe ser al menos 1")]
    InvalidGuests,
    #[error("El número de huéspedes supera la capacidad de la embarcación ({0})")]
    GuestsExceedCapacity(u32),
    #[error("La reserva no puede superar los {0} días")]
    RentalTooLong(i64),
    #[error("El importe total excede el máximo permitido")]
    PriceOverflow,
    #[error("La calificación debe estar entre 1 y 5")]
    InvalidRating,
    #[error("El comentario no puede superar los 1000 caracteres")]
    CommentTooLong,
}

/// Failures checking whether a boat can be held for a date range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("La embarcación no está disponible para reservas")]
    BoatUnavailable,
    #[error("La embarcación no está disponible en las fechas seleccionadas")]
    DatesTaken,
    #[error("Las fechas seleccionadas están retenidas temporalmente por otro usuario")]
    DatesHeld,
}

/// Rejected booking status changes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatusError {
    #[error("No se puede cambiar el estado de la reserva de {from} a {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
    #[error("Solo se pueden cancelar reservas pendientes o confirmadas")]
    NotCancellable,
}

/// Rejected payment attempts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("No se puede pagar una reserva cancelada o completada")]
    BookingClosed,
    #[error("La reserva ya está pagada")]
    AlreadyPaid,
    #[error("El monto no coincide con el total de la reserva")]
    AmountMismatch,
    #[error("Faltan datos del pago: {0}")]
    MissingDetails(&'static str),
    #[error("El código de banco debe tener 4 dígitos")]
    InvalidBankCode,
}

impl PaymentError {
    /// Whether the failure is a state conflict rather than bad input.
    pub fn is_conflict(&self) -> bool {
        matches!(self, PaymentError::BookingClosed | PaymentError::AlreadyPaid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "El correo electrónico no es válido"
        );
        assert_eq!(
            ValidationError::GuestsExceedCapacity(6).to_string(),
            "El número de huéspedes supera la capacidad de la embarcación (6)"
        );
    }

    #[test]
    fn test_status_error_display() {
        let error = StatusError::InvalidTransition {
            from: BookingStatus::Completed,
            to: BookingStatus::Pending,
        };
        assert_eq!(
            error.to_string(),
            "No se puede cambiar el estado de la reserva de completed a pending"
        );
    }

    #[test]
    fn test_payment_error_conflict_classification() {
        assert!(PaymentError::AlreadyPaid.is_conflict());
        assert!(PaymentError::BookingClosed.is_conflict());
        assert!(!PaymentError::AmountMismatch.is_conflict());
        assert!(!PaymentError::MissingDetails("email").is_conflict());
    }
}
