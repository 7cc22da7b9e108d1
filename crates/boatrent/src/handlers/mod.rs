pub mod authz;
pub mod boats;
pub mod bookings;
pub mod health;
pub mod notifications;
pub mod payments;
pub mod reservations;
pub mod reviews;
