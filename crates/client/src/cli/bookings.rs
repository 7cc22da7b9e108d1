//! Booking CLI commands.

use boatrent_core::rental::BookingStatus;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

/// Booking commands.
#[derive(Debug, Parser)]
pub struct BookingsCommand {
    #[command(subcommand)]
    pub action: BookingsAction,
}

/// Statuses an owner can move a booking to.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TargetStatus {
    Confirmed,
    Completed,
    Cancelled,
}

impl From<TargetStatus> for BookingStatus {
    fn from(status: TargetStatus) -> Self {
        match status {
            TargetStatus::Confirmed => BookingStatus::Confirmed,
            TargetStatus::Completed => BookingStatus::Completed,
            TargetStatus::Cancelled => BookingStatus::Cancelled,
        }
    }
}

/// Available booking actions.
#[derive(Debug, Subcommand)]
pub enum BookingsAction {
    /// List bookings.
    List {
        /// Another user's bookings (admin only).
        #[arg(long)]
        user_id: Option<Uuid>,
    },
    /// Get booking by ID.
    Get { id: Uuid },
    /// Book a boat.
    Create {
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
        #[arg(long)]
        notes: Option<String>,
    },
    /// Change a booking's status (boat owner).
    Status {
        id: Uuid,
        #[arg(value_enum)]
        status: TargetStatus,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Cancel a booking.
    Cancel {
        id: Uuid,
        #[arg(long)]
        reason: Option<String>,
    },
}
