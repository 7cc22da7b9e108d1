//! Auth CLI commands.

use boatrent_core::rental::Role;
use clap::{Parser, Subcommand, ValueEnum};

/// Account commands.
#[derive(Debug, Parser)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub action: AuthAction,
}

/// Roles a new account may ask for.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SignupRole {
    Customer,
    Owner,
}

impl From<SignupRole> for Role {
    fn from(role: SignupRole) -> Self {
        match role {
            SignupRole::Customer => Role::Customer,
            SignupRole::Owner => Role::Owner,
        }
    }
}

/// Available auth actions.
#[derive(Debug, Subcommand)]
pub enum AuthAction {
    /// Create an account.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, value_enum, default_value = "customer")]
        role: SignupRole,
    },
    /// Log in and print a token pair.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Trade a refresh token for a new pair.
    Refresh {
        /// Refresh token.
        refresh_token: String,
    },
    /// Show the account behind --token.
    Me,
}
