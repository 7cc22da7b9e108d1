use chrono::NaiveDate;

use super::error::ValidationError;
use super::pricing::rental_days;
use super::types::Boat;

/// Longest rental accepted in a single booking, in days.
pub const MAX_RENTAL_DAYS: i64 = 30;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_COMMENT_LEN: usize = 1000;

/// Validates an email address: one `@`, a non-empty local part, and a dotted domain.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    let dotted = domain
        .split('.')
        .filter(|part| !part.is_empty())
        .count()
        >= 2;

    if local.is_empty()
        || domain.contains('@')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || !dotted
    {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Validates a display name (users and boats share the same limits).
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong);
    }
    Ok(())
}

/// Validates a boat before creation or update.
pub fn validate_boat(boat: &Boat) -> Result<(), ValidationError> {
    validate_name(&boat.name)?;
    if boat.location.trim().is_empty() {
        return Err(ValidationError::EmptyLocation);
    }
    if boat.capacity < 1 {
        return Err(ValidationError::InvalidCapacity);
    }
    if boat.price_per_day_cents <= 0 {
        return Err(ValidationError::InvalidPrice);
    }
    Ok(())
}

/// Validates the shape of a booking or hold request against the boat.
///
/// Availability (`boat.available`, overlaps) is checked separately in
/// [`super::availability::check_availability`].
pub fn validate_booking_request(
    boat: &Boat,
    start: NaiveDate,
    end: NaiveDate,
    guests: u32,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if start > end {
        return Err(ValidationError::InvalidDateRange);
    }
    if start < today {
        return Err(ValidationError::StartDateInPast);
    }
    if guests < 1 {
        return Err(ValidationError::InvalidGuests);
    }
    if guests > boat.capacity {
        return Err(ValidationError::GuestsExceedCapacity(boat.capacity));
    }
    if rental_days(start, end) > MAX_RENTAL_DAYS {
        return Err(ValidationError::RentalTooLong(MAX_RENTAL_DAYS));
    }
    Ok(())
}

pub fn validate_review(rating: u8, comment: Option<&str>) -> Result<(), ValidationError> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::InvalidRating);
    }
    if comment.is_some_and(|c| c.chars().count() > MAX_COMMENT_LEN) {
        return Err(ValidationError::CommentTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::rental::types::BoatType;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, m, d).unwrap()
    }

    fn boat() -> Boat {
        Boat::new(Uuid::nil(), "Lola", BoatType::Catamaran, "Morrocoy", 6, 40_000)
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email(" ana.perez@mail.co.ve ").is_ok());

        for bad in ["", "ana", "@example.com", "ana@", "ana@example", "ana@@example.com", "ana@.com", "ana@example.", "a na@example.com"] {
            assert_eq!(validate_email(bad), Err(ValidationError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn test_validate_password_length() {
        assert_eq!(validate_password("1234567"), Err(ValidationError::PasswordTooShort));
        assert!(validate_password("12345678").is_ok());
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("   "), Err(ValidationError::EmptyName));
        assert_eq!(validate_name(&"x".repeat(101)), Err(ValidationError::NameTooLong));
        assert!(validate_name("María José").is_ok());
    }

    #[test]
    fn test_validate_boat() {
        assert!(validate_boat(&boat()).is_ok());

        let mut no_capacity = boat();
        no_capacity.capacity = 0;
        assert_eq!(validate_boat(&no_capacity), Err(ValidationError::InvalidCapacity));

        let mut free = boat();
        free.price_per_day_cents = 0;
        assert_eq!(validate_boat(&free), Err(ValidationError::InvalidPrice));

        let mut nowhere = boat();
        nowhere.location = " ".to_string();
        assert_eq!(validate_boat(&nowhere), Err(ValidationError::EmptyLocation));
    }

    #[test]
    fn test_validate_booking_request() {
        let boat = boat();
        let today = date(1, 10);

        assert!(validate_booking_request(&boat, date(1, 10), date(1, 12), 6, today).is_ok());
        assert_eq!(
            validate_booking_request(&boat, date(1, 12), date(1, 10), 2, today),
            Err(ValidationError::InvalidDateRange)
        );
        assert_eq!(
            validate_booking_request(&boat, date(1, 9), date(1, 12), 2, today),
            Err(ValidationError::StartDateInPast)
        );
        assert_eq!(
            validate_booking_request(&boat, date(1, 10), date(1, 12), 0, today),
            Err(ValidationError::InvalidGuests)
        );
        assert_eq!(
            validate_booking_request(&boat, date(1, 10), date(1, 12), 7, today),
            Err(ValidationError::GuestsExceedCapacity(6))
        );
        assert!(validate_booking_request(&boat, date(1, 10), date(2, 8), 2, today).is_ok());
        assert_eq!(
            validate_booking_request(&boat, date(1, 10), date(2, 9), 2, today),
            Err(ValidationError::RentalTooLong(30))
        );
    }

    #[test]
    fn test_validate_review() {
        assert!(validate_review(5, Some("Excelente")).is_ok());
        assert_eq!(validate_review(0, None), Err(ValidationError::InvalidRating));
        assert_eq!(validate_review(6, None), Err(ValidationError::InvalidRating));
        assert_eq!(
            validate_review(4, Some(&"a".repeat(1001))),
            Err(ValidationError::CommentTooLong)
        );
    }
}
