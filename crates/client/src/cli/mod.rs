//! CLI command definitions.

pub mod auth;
pub mod boats;
pub mod bookings;
pub mod health;
pub mod notifications;
pub mod payments;
pub mod reservations;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the boatrent API.
#[derive(Debug, Parser)]
#[command(name = "boatrent-client")]
#[command(about = "CLI client for the boatrent API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "BOATRENT_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Access token sent as a Bearer header.
    #[arg(long, env = "BOATRENT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Accounts and tokens.
    Auth(auth::AuthCommand),
    /// Boat listings.
    Boats(boats::BoatsCommand),
    /// Bookings.
    Bookings(bookings::BookingsCommand),
    /// Temporary holds on a date range.
    Reservations(reservations::ReservationsCommand),
    /// Simulated payments.
    Payments(payments::PaymentsCommand),
    /// Notifications for the signed-in user.
    Notifications(notifications::NotificationsCommand),
    /// Server health checks.
    Health(health::HealthCommand),
}
