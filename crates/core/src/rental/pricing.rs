use chrono::NaiveDate;

use super::error::ValidationError;
use super::types::Boat;

/// Number of days billed for an inclusive date range.
pub fn rental_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Total price in cents for renting `boat` from `start` to `end`.
pub fn quote(boat: &Boat, start: NaiveDate, end: NaiveDate) -> Result<i64, ValidationError> {
    if end < start {
        return Err(ValidationError::InvalidDateRange);
    }
    boat.price_per_day_cents
        .checked_mul(rental_days(start, end))
        .ok_or(ValidationError::PriceOverflow)
}
