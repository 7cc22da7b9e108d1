//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the repository traits
//! using `aws-sdk-dynamodb`, one table per entity.

mod conversions;
mod error;
mod keys;
mod repository;

pub use repository::DynamoDbRepository;
