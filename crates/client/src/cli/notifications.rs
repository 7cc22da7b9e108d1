//! Notification CLI commands.

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Notification commands.
#[derive(Debug, Parser)]
pub struct NotificationsCommand {
    #[command(subcommand)]
    pub action: NotificationsAction,
}

#[derive(Debug, Subcommand)]
pub enum NotificationsAction {
    /// List your notifications.
    List {
        /// Hide notifications already read.
        #[arg(long)]
        unread: bool,
    },
    /// Mark a notification as read.
    Read { id: Uuid },
}
