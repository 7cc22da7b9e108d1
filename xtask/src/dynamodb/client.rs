//! Reads the live state of the boatrent tables (Imperative Shell).

use super::error::{DynamodbError, Result};
use super::planning::{GsiState, GsiStatus, TableState, TableStatus};
use aws_sdk_dynamodb::types::{self, AttributeValue, TimeToLiveStatus};
use aws_sdk_dynamodb::Client;
use uuid::Uuid;

/// Where the tasks connect, taken from `AWS_ENDPOINT_URL` and `AWS_REGION`.
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// Set for DynamoDB Local.
    pub endpoint_url: Option<String>,
    pub region: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        }
    }
}

impl AwsConfig {
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

pub async fn create_client(config: &AwsConfig) -> Result<Client> {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    Ok(Client::new(&loader.load().await))
}

fn table_status(status: Option<&types::TableStatus>) -> TableStatus {
    match status {
        Some(types::TableStatus::Creating) => TableStatus::Creating,
        Some(types::TableStatus::Updating) => TableStatus::Updating,
        Some(types::TableStatus::Deleting) => TableStatus::Deleting,
        _ => TableStatus::Active,
    }
}

fn gsi_status(status: Option<&types::IndexStatus>) -> GsiStatus {
    match status {
        Some(types::IndexStatus::Creating) => GsiStatus::Creating,
        Some(types::IndexStatus::Updating) => GsiStatus::Updating,
        Some(types::IndexStatus::Deleting) => GsiStatus::Deleting,
        _ => GsiStatus::Active,
    }
}

/// Describes a table, its GSIs and its TTL attribute.
///
/// Returns `None` if the table doesn't exist.
pub async fn get_table_state(client: &Client, table_name: &str) -> Result<Option<TableState>> {
    let response = match client.describe_table().table_name(table_name).send().await {
        Ok(response) => response,
        Err(err)
            if err
                .as_service_error()
                .is_some_and(|e| e.is_resource_not_found_exception()) =>
        {
            return Ok(None);
        }
        Err(err) => return Err(DynamodbError::sdk(err)),
    };
    let Some(table) = response.table() else {
        return Ok(None);
    };

    let gsis = table
        .global_secondary_indexes()
        .iter()
        .map(|gsi| GsiState {
            name: gsi.index_name().unwrap_or_default().to_string(),
            status: gsi_status(gsi.index_status()),
        })
        .collect();

    Ok(Some(TableState {
        status: table_status(table.table_status()),
        gsis,
        ttl_attribute: get_ttl_attribute(client, table_name).await?,
    }))
}

/// The attribute TTL is enabled (or being enabled) on.
async fn get_ttl_attribute(client: &Client, table_name: &str) -> Result<Option<String>> {
    let response = client
        .describe_time_to_live()
        .table_name(table_name)
        .send()
        .await
        .map_err(DynamodbError::sdk)?;

    Ok(response.time_to_live_description().and_then(|ttl| {
        match ttl.time_to_live_status() {
            Some(TimeToLiveStatus::Enabled | TimeToLiveStatus::Enabling) => {
                ttl.attribute_name().map(str::to_string)
            }
            _ => None,
        }
    }))
}

/// Looks up the `role` of a user, `None` if the user doesn't exist.
pub async fn get_user_role(
    client: &Client,
    users_table: &str,
    user_id: Uuid,
) -> Result<Option<String>> {
    let response = client
        .get_item()
        .table_name(users_table)
        .key("id", AttributeValue::S(user_id.to_string()))
        .projection_expression("#role")
        .expression_attribute_names("#role", "role")
        .send()
        .await
        .map_err(DynamodbError::sdk)?;

    Ok(response.item().map(|item| {
        item.get("role")
            .and_then(|role| role.as_s().ok())
            .cloned()
            .unwrap_or_default()
    }))
}
