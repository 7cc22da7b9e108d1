mod availability;
mod error;
mod mock_data;
mod notifications;
mod payment;
mod pricing;
mod requests;
mod status;
mod types;
mod validation;

pub use availability::{
    check_availability, filter_boats, find_conflicting_booking, find_conflicting_reservation,
    is_booked_between, ranges_overlap,
};
pub use error::{AvailabilityError, PaymentError, StatusError, ValidationError};
pub use mock_data::{boat_type_label, generate_seed_boats};
pub use notifications::{
    booking_created, booking_status_changed, format_cents, payment_received, review_received,
};
pub use payment::{parse_payment_details, process_payment, settlement_status, PaymentOutcome};
pub use pricing::{quote, rental_days};
pub use requests::{
    AvailabilityQuery, AvailabilityResponse, BoatSearch, CancelBookingRequest,
    ConfirmReservationRequest, CreateBoatRequest, CreateBookingRequest, CreateReservationRequest,
    CreateReviewRequest, ListBoatsQuery, ListBookingsQuery, PaymentDetailsInput,
    ProcessPaymentRequest, UpdateBoatRequest, UpdateBookingStatusRequest,
};
pub use status::{can_transition, cancel_booking, transition_booking};
pub use types::{
    Boat, BoatType, Booking, BookingStatus, Notification, NotificationKind, Payment,
    PaymentDetails, PaymentMethod, PaymentRecordStatus, PaymentStatus, Reservation, Review, Role,
    User,
};
pub use validation::{
    validate_boat, validate_booking_request, validate_email, validate_name, validate_password,
    validate_review, MAX_RENTAL_DAYS,
};
