//! Demo data for seeding and tests.
//!
//! Pure functions: the same inputs always produce the same fleet, apart
//! from generated IDs and timestamps.

use uuid::Uuid;

use super::types::{Boat, BoatType};

const NAMES: [&str; 10] = [
    "Brisa del Caribe",
    "Lola",
    "Pargo Rojo",
    "Estrella de Mar",
    "Alcatraz",
    "Viento Norte",
    "La Tortuga",
    "Coral Azul",
    "Gaviota",
    "Sol de Oriente",
];

const LOCATIONS: [&str; 5] = [
    "Isla de Margarita",
    "Los Roques",
    "Morrocoy",
    "Puerto La Cruz",
    "Mochima",
];

const AMENITIES: [&str; 6] = [
    "GPS",
    "Chalecos salvavidas",
    "Nevera",
    "Equipo de snorkel",
    "Baño",
    "Toldo",
];

/// Capacity and base daily price (cents) for each boat type.
fn profile(boat_type: BoatType) -> (u32, i64) {
    match boat_type {
        BoatType::Yacht => (12, 120_000),
        BoatType::Sailboat => (8, 45_000),
        BoatType::Speedboat => (6, 35_000),
        BoatType::Catamaran => (14, 90_000),
        BoatType::Fishing => (5, 25_000),
        BoatType::Pontoon => (10, 30_000),
        BoatType::Jetski => (2, 12_000),
    }
}

/// Generate `count` demo boats owned by `owner_id`.
///
/// Cycles through every boat type and location so searches have something
/// to match.
pub fn generate_seed_boats(owner_id: Uuid, count: u32) -> Vec<Boat> {
    (0..count as usize)
        .map(|i| {
            let boat_type = BoatType::ALL[i % BoatType::ALL.len()];
            let (capacity, base_price) = profile(boat_type);
            let name = NAMES[i % NAMES.len()];
            let location = LOCATIONS[i % LOCATIONS.len()];
            let price = base_price + (i as i64 % 4) * 2_500;
            let amenities = AMENITIES.iter().take(2 + i % (AMENITIES.len() - 1)).copied();

            let name = if i < NAMES.len() {
                name.to_string()
            } else {
                format!("{name} {}", i / NAMES.len() + 1)
            };

            Boat::new(owner_id, name, boat_type, location, capacity, price)
                .with_description(format!("{} en {location}", boat_type_label(boat_type)))
                .with_amenities(amenities)
        })
        .collect()
}

/// Spanish label for a boat type.
pub fn boat_type_label(boat_type: BoatType) -> &'static str {
    match boat_type {
        BoatType::Yacht => "Yate",
        BoatType::Sailboat => "Velero",
        BoatType::Speedboat => "Lancha rápida",
        BoatType::Catamaran => "Catamarán",
        BoatType::Fishing => "Bote de pesca",
        BoatType::Pontoon => "Pontón",
        BoatType::Jetski => "Moto de agua",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rental::validate_boat;

    #[test]
    fn test_generate_seed_boats_count_and_owner() {
        let owner = Uuid::new_v4();
        let boats = generate_seed_boats(owner, 12);

        assert_eq!(boats.len(), 12);
        assert!(boats.iter().all(|b| b.owner_id == owner));
    }

    #[test]
    fn test_seed_boats_are_valid() {
        for boat in generate_seed_boats(Uuid::nil(), 25) {
            assert!(validate_boat(&boat).is_ok(), "{}", boat.name);
        }
    }

    #[test]
    fn test_seed_boats_cover_all_types() {
        let boats = generate_seed_boats(Uuid::nil(), 7);
        for boat_type in BoatType::ALL {
            assert!(boats.iter().any(|b| b.boat_type == boat_type));
        }
    }

    #[test]
    fn test_seed_boat_names_are_unique() {
        let boats = generate_seed_boats(Uuid::nil(), 25);
        let mut names: Vec<_> = boats.iter().map(|b| b.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 25);
    }
}
