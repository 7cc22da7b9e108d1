//! Boat CLI commands.

use boatrent_core::rental::BoatType;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

/// Boat commands.
#[derive(Debug, Parser)]
pub struct BoatsCommand {
    #[command(subcommand)]
    pub action: BoatsAction,
}

/// CLI boat type (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BoatKind {
    Yacht,
    Sailboat,
    Speedboat,
    Catamaran,
    Fishing,
    Pontoon,
    Jetski,
}

impl From<BoatKind> for BoatType {
    fn from(kind: BoatKind) -> Self {
        match kind {
            BoatKind::Yacht => BoatType::Yacht,
            BoatKind::Sailboat => BoatType::Sailboat,
            BoatKind::Speedboat => BoatType::Speedboat,
            BoatKind::Catamaran => BoatType::Catamaran,
            BoatKind::Fishing => BoatType::Fishing,
            BoatKind::Pontoon => BoatType::Pontoon,
            BoatKind::Jetski => BoatType::Jetski,
        }
    }
}

/// Available boat actions.
#[derive(Debug, Subcommand)]
pub enum BoatsAction {
    /// List boats.
    List {
        /// Only boats of this owner.
        #[arg(long)]
        owner_id: Option<Uuid>,
    },
    /// Search boats.
    Search {
        /// Free text matched against name, location and description.
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long, value_enum)]
        boat_type: Option<BoatKind>,
        #[arg(long)]
        min_capacity: Option<u32>,
        /// Maximum price per day, in cents.
        #[arg(long)]
        max_price: Option<i64>,
        /// Start date (YYYY-MM-DD).
        #[arg(long, requires = "end")]
        start: Option<NaiveDate>,
        /// End date (YYYY-MM-DD), inclusive.
        #[arg(long, requires = "start")]
        end: Option<NaiveDate>,
    },
    /// Get boat by ID.
    Get { id: Uuid },
    /// Publish a boat.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, value_enum)]
        boat_type: BoatKind,
        #[arg(long)]
        location: String,
        #[arg(long)]
        capacity: u32,
        /// Price per day, in cents.
        #[arg(long)]
        price: i64,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change price or availability of a boat.
    Update {
        id: Uuid,
        /// Price per day, in cents.
        #[arg(long)]
        price: Option<i64>,
        #[arg(long)]
        available: Option<bool>,
    },
    /// Delete boat by ID.
    Delete { id: Uuid },
    /// Check availability and price for a date range.
    Availability {
        id: Uuid,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
    /// List reviews of a boat.
    Reviews { id: Uuid },
    /// Review a boat you rented.
    Review {
        id: Uuid,
        /// 1 to 5.
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        #[arg(long)]
        comment: Option<String>,
    },
}
