use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::error::AvailabilityError;
use super::requests::BoatSearch;
use super::types::{Boat, Booking, Reservation};

/// Inclusive overlap of two date ranges.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Returns the first active booking of `boat_id` that overlaps `start..=end`.
///
/// `exclude` skips one booking, for re-checking a booking against its peers.
pub fn find_conflicting_booking(
    bookings: &[Booking],
    boat_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
    exclude: Option<Uuid>,
) -> Option<&Booking> {
    bookings.iter().find(|booking| {
        booking.boat_id == boat_id
            && booking.is_active()
            && exclude != Some(booking.id)
            && ranges_overlap(booking.start_date, booking.end_date, start, end)
    })
}

/// Returns the first live hold on `boat_id` by another user that overlaps `start..=end`.
pub fn find_conflicting_reservation(
    reservations: &[Reservation],
    boat_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Option<&Reservation> {
    reservations.iter().find(|hold| {
        hold.boat_id == boat_id
            && hold.user_id != user_id
            && hold.is_live(now)
            && ranges_overlap(hold.start_date, hold.end_date, start, end)
    })
}

/// Checks that `boat` can be taken by `user_id` for `start..=end`.
pub fn check_availability(
    boat: &Boat,
    bookings: &[Booking],
    reservations: &[Reservation],
    start: NaiveDate,
    end: NaiveDate,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<(), AvailabilityError> {
    if !boat.available {
        return Err(AvailabilityError::BoatUnavailable);
    }
    if find_conflicting_booking(bookings, boat.id, start, end, None).is_some() {
        return Err(AvailabilityError::DatesTaken);
    }
    if find_conflicting_reservation(reservations, boat.id, start, end, user_id, now).is_some() {
        return Err(AvailabilityError::DatesHeld);
    }
    Ok(())
}

/// Whether the boat has an active booking overlapping the window.
pub fn is_booked_between(
    bookings: &[Booking],
    boat_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> bool {
    find_conflicting_booking(bookings, boat_id, start, end, None).is_some()
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Filters boats by search criteria.
///
/// A date window only applies when both ends are present; boats with an
/// overlapping active booking are excluded.
pub fn filter_boats<'a>(
    boats: &'a [Boat],
    search: &BoatSearch,
    bookings: &[Booking],
) -> Vec<&'a Boat> {
    let q = search.q.as_deref().map(str::to_lowercase);
    let location = search.location.as_deref().map(str::to_lowercase);
    let window = search.start_date.zip(search.end_date);

    boats
        .iter()
        .filter(|boat| {
            q.as_deref().is_none_or(|q| {
                contains_ignore_case(&boat.name, q)
                    || contains_ignore_case(&boat.location, q)
                    || boat
                        .description
                        .as_deref()
                        .is_some_and(|d| contains_ignore_case(d, q))
            }) && location
                .as_deref()
                .is_none_or(|l| contains_ignore_case(&boat.location, l))
                && search.boat_type.is_none_or(|t| boat.boat_type == t)
                && search.min_capacity.is_none_or(|c| boat.capacity >= c)
                && search.max_price.is_none_or(|p| boat.price_per_day_cents <= p)
                && (!search.available_only || boat.available)
                && window.is_none_or(|(start, end)| {
                    boat.available && !is_booked_between(bookings, boat.id, start, end)
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::rental::types::{BoatType, BookingStatus};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, d).unwrap()
    }

    fn boat() -> Boat {
        Boat::new(Uuid::new_v4(), "Lola", BoatType::Yacht, "Margarita", 8, 50_000)
    }

    fn booking(boat: &Boat, start: u32, end: u32, status: BookingStatus) -> Booking {
        Booking::new(Uuid::new_v4(), boat.id, date(start), date(end), 2, 100_000).with_status(status)
    }

    #[test]
    fn test_ranges_overlap_is_inclusive() {
        assert!(ranges_overlap(date(1), date(5), date(5), date(8)));
        assert!(ranges_overlap(date(3), date(3), date(1), date(5)));
        assert!(!ranges_overlap(date(1), date(4), date(5), date(8)));
        assert!(!ranges_overlap(date(6), date(8), date(1), date(5)));
    }

    #[test]
    fn test_find_conflicting_booking_ignores_inactive() {
        let boat = boat();
        let bookings = vec![
            booking(&boat, 1, 5, BookingStatus::Cancelled),
            booking(&boat, 1, 5, BookingStatus::Completed),
        ];

        assert!(find_conflicting_booking(&bookings, boat.id, date(2), date(3), None).is_none());
    }

    #[test]
    fn test_find_conflicting_booking_detects_overlap() {
        let boat = boat();
        let existing = booking(&boat, 10, 12, BookingStatus::Confirmed);
        let bookings = vec![existing.clone()];

        let conflict = find_conflicting_booking(&bookings, boat.id, date(12), date(14), None);
        assert_eq!(conflict.map(|b| b.id), Some(existing.id));

        assert!(
            find_conflicting_booking(&bookings, boat.id, date(12), date(14), Some(existing.id))
                .is_none()
        );
        assert!(find_conflicting_booking(&bookings, Uuid::new_v4(), date(12), date(14), None)
            .is_none());
    }

    #[test]
    fn test_own_reservation_does_not_conflict() {
        let boat = boat();
        let user = Uuid::new_v4();
        let now = Utc::now();
        let hold = Reservation::new(user, boat.id, date(1), date(3), 2, now, Duration::minutes(30));
        let holds = vec![hold];

        assert!(
            find_conflicting_reservation(&holds, boat.id, date(2), date(4), user, now).is_none()
        );
        assert!(find_conflicting_reservation(
            &holds,
            boat.id,
            date(2),
            date(4),
            Uuid::new_v4(),
            now
        )
        .is_some());
    }

    #[test]
    fn test_expired_reservation_does_not_conflict() {
        let boat = boat();
        let now = Utc::now();
        let hold = Reservation::new(
            Uuid::new_v4(),
            boat.id,
            date(1),
            date(3),
            2,
            now - Duration::hours(1),
            Duration::minutes(30),
        );

        assert!(find_conflicting_reservation(
            &[hold],
            boat.id,
            date(1),
            date(3),
            Uuid::new_v4(),
            now
        )
        .is_none());
    }

    #[test]
    fn test_check_availability_errors() {
        let mut boat = boat();
        let bookings = vec![booking(&boat, 1, 5, BookingStatus::Pending)];
        let now = Utc::now();
        let user = Uuid::new_v4();

        assert_eq!(
            check_availability(&boat, &bookings, &[], date(4), date(6), user, now),
            Err(AvailabilityError::DatesTaken)
        );
        assert_eq!(
            check_availability(&boat, &bookings, &[], date(6), date(7), user, now),
            Ok(())
        );

        boat.available = false;
        assert_eq!(
            check_availability(&boat, &[], &[], date(6), date(7), user, now),
            Err(AvailabilityError::BoatUnavailable)
        );
    }

    #[test]
    fn test_filter_boats_by_criteria() {
        let yacht = boat().with_description("Yate con cocina");
        let mut skiff = Boat::new(Uuid::new_v4(), "Pargo", BoatType::Fishing, "Los Roques", 4, 20_000);
        skiff.available = false;
        let boats = vec![yacht.clone(), skiff.clone()];

        let by_text = BoatSearch {
            q: Some("COCINA".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_boats(&boats, &by_text, &[]).len(), 1);

        let by_location = BoatSearch {
            location: Some("roques".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_boats(&boats, &by_location, &[])[0].id, skiff.id);

        let cheap_and_big = BoatSearch {
            max_price: Some(30_000),
            min_capacity: Some(6),
            ..Default::default()
        };
        assert!(filter_boats(&boats, &cheap_and_big, &[]).is_empty());

        let available_only = BoatSearch {
            available_only: true,
            ..Default::default()
        };
        assert_eq!(filter_boats(&boats, &available_only, &[])[0].id, yacht.id);
    }

    #[test]
    fn test_filter_boats_excludes_booked_in_window() {
        let lola = boat();
        let other = Boat::new(Uuid::new_v4(), "Brisa", BoatType::Sailboat, "Margarita", 6, 30_000);
        let bookings = vec![booking(&lola, 10, 12, BookingStatus::Confirmed)];
        let boats = vec![lola, other.clone()];

        let search = BoatSearch {
            start_date: Some(date(11)),
            end_date: Some(date(13)),
            ..Default::default()
        };
        let found = filter_boats(&boats, &search, &bookings);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, other.id);
    }
}
