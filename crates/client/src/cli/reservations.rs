//! Reservation hold CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Reservation commands.
#[derive(Debug, Parser)]
pub struct ReservationsCommand {
    #[command(subcommand)]
    pub action: ReservationsAction,
}

/// Available reservation actions.
#[derive(Debug, Subcommand)]
pub enum ReservationsAction {
    /// Hold dates on a boat for a few minutes.
    Hold {
        #[arg(long)]
        boat_id: Uuid,
        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,
        /// End date (YYYY-MM-DD), inclusive.
        #[arg(long)]
        end: NaiveDate,
        #[arg(long, default_value = "1")]
        guests: u32,
    },
    /// Turn a hold into a booking.
    Confirm {
        id: Uuid,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Release a hold.
    Release { id: Uuid },
}
