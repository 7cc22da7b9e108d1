//! Authorization helpers for API handlers.
//!
//! Ownership and role checks for boats and bookings. Failures map to
//! 403 Forbidden via [`ApiError`].

use boatrent_core::rental::{Boat, Booking, Reservation, User};
use uuid::Uuid;

use crate::error::ApiError;

/// Authorization error that maps to HTTP 403 Forbidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// Only owners and admins can publish boats.
    NotBoatManager { user_id: Uuid },
    /// The user neither owns the boat nor is an admin.
    NotBoatOwner { user_id: Uuid, boat_id: Uuid },
    /// The user is not a party to the booking.
    NotBookingParty { user_id: Uuid, booking_id: Uuid },
    /// Holds can only be confirmed or released by whoever placed them.
    NotHoldOwner { user_id: Uuid, reservation_id: Uuid },
    /// The action is reserved for admins.
    AdminOnly { user_id: Uuid },
    /// Reviews need a completed rental of the boat.
    NotRenter { user_id: Uuid, boat_id: Uuid },
}

impl AuthzError {
    fn message(&self) -> &'static str {
        match self {
            Self::NotBoatManager { .. } => "Solo los propietarios pueden publicar embarcaciones",
            Self::NotBoatOwner { .. } => "No tienes permiso para modificar esta embarcación",
            Self::NotBookingParty { .. } => "No tienes acceso a esta reserva",
            Self::NotHoldOwner { .. } => "Esta retención pertenece a otro usuario",
            Self::AdminOnly { .. } => "Acción reservada para administradores",
            Self::NotRenter { .. } => {
                "Solo puedes reseñar embarcaciones que hayas alquilado"
            }
        }
    }
}

impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        tracing::warn!(?err, "Authorization denied");
        ApiError::forbidden(err.message())
    }
}

/// Requires the `owner` or `admin` role.
pub fn require_boat_manager(user: &User) -> Result<(), AuthzError> {
    if user.role.can_manage_boats() {
        Ok(())
    } else {
        Err(AuthzError::NotBoatManager { user_id: user.id })
    }
}

/// Requires the user to own `boat`, or be an admin.
pub fn require_boat_owner(user: &User, boat: &Boat) -> Result<(), AuthzError> {
    if boat.owner_id == user.id || user.role.is_admin() {
        Ok(())
    } else {
        Err(AuthzError::NotBoatOwner {
            user_id: user.id,
            boat_id: boat.id,
        })
    }
}

/// Requires the user to be the customer on `booking`.
pub fn require_booking_customer(user: &User, booking: &Booking) -> Result<(), AuthzError> {
    if booking.user_id == user.id {
        Ok(())
    } else {
        Err(AuthzError::NotBookingParty {
            user_id: user.id,
            booking_id: booking.id,
        })
    }
}

/// Requires the user to be the customer, the boat owner, or an admin.
pub fn require_booking_party(
    user: &User,
    booking: &Booking,
    boat: Option<&Boat>,
) -> Result<(), AuthzError> {
    let owns_boat = boat.is_some_and(|b| b.owner_id == user.id);
    if booking.user_id == user.id || owns_boat || user.role.is_admin() {
        Ok(())
    } else {
        Err(AuthzError::NotBookingParty {
            user_id: user.id,
            booking_id: booking.id,
        })
    }
}

pub fn require_hold_owner(user: &User, reservation: &Reservation) -> Result<(), AuthzError> {
    if reservation.user_id == user.id {
        Ok(())
    } else {
        Err(AuthzError::NotHoldOwner {
            user_id: user.id,
            reservation_id: reservation.id,
        })
    }
}

pub fn require_admin(user: &User) -> Result<(), AuthzError> {
    if user.role.is_admin() {
        Ok(())
    } else {
        Err(AuthzError::AdminOnly { user_id: user.id })
    }
}

#[cfg(test)]
mod tests {
    use boatrent_core::rental::{BoatType, Role};
    use chrono::NaiveDate;

    use super::*;

    fn user(role: Role) -> User {
        User::new("u@example.com", "U", role, "hash")
    }

    fn boat_of(owner: &User) -> Boat {
        Boat::new(owner.id, "Lola", BoatType::Yacht, "Mochima", 6, 40_000)
    }

    fn booking_of(customer: &User, boat: &Boat) -> Booking {
        let day = NaiveDate::from_ymd_opt(2030, 3, 1).unwrap();
        Booking::new(customer.id, boat.id, day, day, 2, 40_000)
    }

    #[test]
    fn test_customers_cannot_manage_boats() {
        assert!(require_boat_manager(&user(Role::Customer)).is_err());
        assert!(require_boat_manager(&user(Role::Owner)).is_ok());
        assert!(require_boat_manager(&user(Role::Admin)).is_ok());
    }

    #[test]
    fn test_boat_owner_or_admin() {
        let owner = user(Role::Owner);
        let other = user(Role::Owner);
        let boat = boat_of(&owner);

        assert!(require_boat_owner(&owner, &boat).is_ok());
        assert!(require_boat_owner(&user(Role::Admin), &boat).is_ok());
        assert_eq!(
            require_boat_owner(&other, &boat),
            Err(AuthzError::NotBoatOwner {
                user_id: other.id,
                boat_id: boat.id
            })
        );
    }

    #[test]
    fn test_booking_party() {
        let owner = user(Role::Owner);
        let customer = user(Role::Customer);
        let stranger = user(Role::Customer);
        let boat = boat_of(&owner);
        let booking = booking_of(&customer, &boat);

        assert!(require_booking_party(&customer, &booking, Some(&boat)).is_ok());
        assert!(require_booking_party(&owner, &booking, Some(&boat)).is_ok());
        assert!(require_booking_party(&owner, &booking, None).is_err());
        assert!(require_booking_party(&stranger, &booking, Some(&boat)).is_err());
    }

    #[test]
    fn test_only_customer_pays() {
        let owner = user(Role::Owner);
        let customer = user(Role::Customer);
        let boat = boat_of(&owner);
        let booking = booking_of(&customer, &boat);

        assert!(require_booking_customer(&customer, &booking).is_ok());
        assert!(require_booking_customer(&owner, &booking).is_err());
    }

    #[test]
    fn test_authz_error_is_forbidden() {
        let error = ApiError::from(AuthzError::AdminOnly {
            user_id: Uuid::nil(),
        });
        assert_eq!(error.status_code(), axum::http::StatusCode::FORBIDDEN);
    }
}
