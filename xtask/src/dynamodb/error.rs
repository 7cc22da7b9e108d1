//! Errors for the dynamodb tasks.

use std::fmt::Display;

use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, DynamodbError>;

#[derive(Error, Debug)]
pub enum DynamodbError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("Table '{table_name}' not found; run `cargo xtask dynamodb deploy` first")]
    TableNotFound { table_name: String },

    #[error("No user {owner_id} in '{table_name}'")]
    OwnerNotFound { owner_id: Uuid, table_name: String },

    #[error("User {owner_id} has role '{role}'; boats need an owner or admin")]
    NotAnOwner { owner_id: Uuid, role: String },

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Table '{table_name}' did not become active in time")]
    TableActivationTimeout { table_name: String },

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl DynamodbError {
    /// Wraps any SDK or builder error.
    pub fn sdk(err: impl Display) -> Self {
        Self::AwsSdk(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_point_at_the_fix() {
        let missing = DynamodbError::TableNotFound {
            table_name: "boatrent-boats".to_string(),
        };
        assert!(missing.to_string().contains("dynamodb deploy"));

        let customer = DynamodbError::NotAnOwner {
            owner_id: Uuid::nil(),
            role: "customer".to_string(),
        };
        assert!(customer.to_string().contains("'customer'"));
    }
}
