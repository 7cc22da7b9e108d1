//! boatrent_client - CLI client for the boatrent API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::BoatrentClient;
pub use error::{ClientError, Result};
