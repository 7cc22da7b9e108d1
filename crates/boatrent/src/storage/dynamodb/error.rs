//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `boatrent_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use boatrent_core::storage::RepositoryError;

/// What a failed write condition means for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// `attribute_not_exists(id)`: the item is already there.
    Create,
    /// `attribute_exists(id)`: the item is gone.
    Update,
    /// Status-guarded write: someone changed the item first.
    Conditional,
}

impl WriteKind {
    fn condition_failed(self, entity_type: &'static str, id: String) -> RepositoryError {
        match self {
            WriteKind::Create => RepositoryError::AlreadyExists { entity_type, id },
            WriteKind::Update => RepositoryError::NotFound { entity_type, id },
            WriteKind::Conditional => RepositoryError::Conflict { entity_type, id },
        }
    }
}

fn throttled() -> RepositoryError {
    RepositoryError::QueryFailed("Throughput exceeded, please retry".to_string())
}

fn request_limit() -> RepositoryError {
    RepositoryError::QueryFailed("Request limit exceeded, please retry".to_string())
}

fn internal() -> RepositoryError {
    RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
}

fn table_missing() -> RepositoryError {
    RepositoryError::QueryFailed("Table not found".to_string())
}

/// Map a GetItem SDK error to RepositoryError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> RepositoryError {
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => table_missing(),
        GetItemError::ProvisionedThroughputExceededException(_) => throttled(),
        GetItemError::RequestLimitExceeded(_) => request_limit(),
        GetItemError::InternalServerError(_) => internal(),
        err => RepositoryError::QueryFailed(format!("GetItem failed: {:?}", err)),
    }
}

/// Map a Query SDK error to RepositoryError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> RepositoryError {
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => table_missing(),
        QueryError::ProvisionedThroughputExceededException(_) => throttled(),
        QueryError::RequestLimitExceeded(_) => request_limit(),
        QueryError::InternalServerError(_) => internal(),
        err => RepositoryError::QueryFailed(format!("Query failed: {:?}", err)),
    }
}

/// Map a Scan SDK error to RepositoryError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
) -> RepositoryError {
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => table_missing(),
        ScanError::ProvisionedThroughputExceededException(_) => throttled(),
        ScanError::RequestLimitExceeded(_) => request_limit(),
        ScanError::InternalServerError(_) => internal(),
        err => RepositoryError::QueryFailed(format!("Scan failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to RepositoryError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    kind: WriteKind,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => {
            kind.condition_failed(entity_type, id.into())
        }
        PutItemError::ResourceNotFoundException(_) => table_missing(),
        PutItemError::ProvisionedThroughputExceededException(_) => throttled(),
        PutItemError::RequestLimitExceeded(_) => request_limit(),
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            RepositoryError::QueryFailed("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => internal(),
        err => RepositoryError::QueryFailed(format!("PutItem failed: {:?}", err)),
    }
}

/// Map an UpdateItem SDK error to RepositoryError.
///
/// UpdateItem is only issued against existing items, so a failed condition
/// means the item is missing.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    match err.into_service_error() {
        UpdateItemError::ConditionalCheckFailedException(_) => {
            WriteKind::Update.condition_failed(entity_type, id.into())
        }
        UpdateItemError::ResourceNotFoundException(_) => table_missing(),
        UpdateItemError::ProvisionedThroughputExceededException(_) => throttled(),
        UpdateItemError::RequestLimitExceeded(_) => request_limit(),
        UpdateItemError::TransactionConflictException(_) => {
            RepositoryError::QueryFailed("Transaction conflict, please retry".to_string())
        }
        UpdateItemError::InternalServerError(_) => internal(),
        err => RepositoryError::QueryFailed(format!("UpdateItem failed: {:?}", err)),
    }
}

/// Map a DeleteItem SDK error to RepositoryError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    match err.into_service_error() {
        DeleteItemError::ConditionalCheckFailedException(_) => {
            WriteKind::Update.condition_failed(entity_type, id.into())
        }
        DeleteItemError::ResourceNotFoundException(_) => table_missing(),
        DeleteItemError::ProvisionedThroughputExceededException(_) => throttled(),
        DeleteItemError::RequestLimitExceeded(_) => request_limit(),
        DeleteItemError::TransactionConflictException(_) => {
            RepositoryError::QueryFailed("Transaction conflict, please retry".to_string())
        }
        DeleteItemError::InternalServerError(_) => internal(),
        err => RepositoryError::QueryFailed(format!("DeleteItem failed: {:?}", err)),
    }
}
