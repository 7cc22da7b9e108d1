//! Table deployment operations (Imperative Shell).

use super::client;
use super::config::{self, GsiConfig, KeyAttribute, TableConfig};
use super::error::{DynamodbError, Result};
use super::planning::{DeployPlan, DestroyPlan, GsiStatus, TableStatus};
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, CreateGlobalSecondaryIndexAction, GlobalSecondaryIndex,
    GlobalSecondaryIndexUpdate, KeySchemaElement, KeyType, Projection, ProjectionType,
    ScalarAttributeType, TimeToLiveSpecification,
};
use aws_sdk_dynamodb::Client;
use std::time::Duration;

/// Execute a deploy plan.
pub async fn execute_deploy_plan(client: &Client, plan: &DeployPlan) -> Result<()> {
    match plan {
        DeployPlan::CreateTable { config } => {
            create_table(client, config).await?;
            wait_for_table_active(client, &config.table_name).await?;
            if let Some(attribute) = &config.ttl_attribute {
                enable_ttl_on(client, &config.table_name, attribute).await?;
            }
        }
        DeployPlan::UpdateTable {
            table_name,
            gsis_to_add,
            enable_ttl,
        } => {
            // DynamoDB allows one GSI creation per UpdateTable call
            for gsi in gsis_to_add {
                add_gsi(client, table_name, gsi).await?;
                wait_for_table_active(client, table_name).await?;
            }
            if let Some(attribute) = enable_ttl {
                enable_ttl_on(client, table_name, attribute).await?;
            }
        }
        DeployPlan::NoChanges { .. } => {}
    }
    Ok(())
}

/// Execute a destroy plan.
pub async fn execute_destroy_plan(client: &Client, plan: &DestroyPlan) -> Result<()> {
    if let DestroyPlan::DeleteTable { table_name } = plan {
        client
            .delete_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(DynamodbError::sdk)?;
    }
    Ok(())
}

fn hash_key(key: &KeyAttribute) -> Result<KeySchemaElement> {
    KeySchemaElement::builder()
        .attribute_name(&key.name)
        .key_type(KeyType::Hash)
        .build()
        .map_err(DynamodbError::sdk)
}

fn attribute_definition(key: &KeyAttribute) -> Result<AttributeDefinition> {
    AttributeDefinition::builder()
        .attribute_name(&key.name)
        .attribute_type(to_scalar_type(&key.attribute_type))
        .build()
        .map_err(DynamodbError::sdk)
}

fn projection(gsi: &GsiConfig) -> Projection {
    let projection_type = match gsi.projection {
        config::ProjectionType::All => ProjectionType::All,
    };
    Projection::builder().projection_type(projection_type).build()
}

async fn create_table(client: &Client, config: &TableConfig) -> Result<()> {
    let mut attribute_definitions = vec![attribute_definition(&config.partition_key)?];

    for gsi in &config.gsis {
        let name = gsi.partition_key.name.as_str();
        if !attribute_definitions
            .iter()
            .any(|a| a.attribute_name() == name)
        {
            attribute_definitions.push(attribute_definition(&gsi.partition_key)?);
        }
    }

    let billing_mode = match config.billing_mode {
        config::BillingMode::PayPerRequest => BillingMode::PayPerRequest,
    };

    let mut request = client
        .create_table()
        .table_name(&config.table_name)
        .key_schema(hash_key(&config.partition_key)?)
        .set_attribute_definitions(Some(attribute_definitions))
        .billing_mode(billing_mode);

    for gsi in &config.gsis {
        request = request.global_secondary_indexes(
            GlobalSecondaryIndex::builder()
                .index_name(&gsi.name)
                .key_schema(hash_key(&gsi.partition_key)?)
                .projection(projection(gsi))
                .build()
                .map_err(DynamodbError::sdk)?,
        );
    }

    request
        .send()
        .await
        .map_err(DynamodbError::sdk)?;
    Ok(())
}

async fn enable_ttl_on(client: &Client, table_name: &str, attribute: &str) -> Result<()> {
    let specification = TimeToLiveSpecification::builder()
        .attribute_name(attribute)
        .enabled(true)
        .build()
        .map_err(DynamodbError::sdk)?;

    client
        .update_time_to_live()
        .table_name(table_name)
        .time_to_live_specification(specification)
        .send()
        .await
        .map_err(DynamodbError::sdk)?;
    Ok(())
}

async fn add_gsi(client: &Client, table_name: &str, gsi: &GsiConfig) -> Result<()> {
    let action = CreateGlobalSecondaryIndexAction::builder()
        .index_name(&gsi.name)
        .key_schema(hash_key(&gsi.partition_key)?)
        .projection(projection(gsi))
        .build()
        .map_err(DynamodbError::sdk)?;

    client
        .update_table()
        .table_name(table_name)
        .attribute_definitions(attribute_definition(&gsi.partition_key)?)
        .global_secondary_index_updates(GlobalSecondaryIndexUpdate::builder().create(action).build())
        .send()
        .await
        .map_err(DynamodbError::sdk)?;

    Ok(())
}

async fn wait_for_table_active(client: &Client, table_name: &str) -> Result<()> {
    let max_attempts = 60;
    let delay = Duration::from_secs(2);

    for _ in 0..max_attempts {
        if let Some(state) = client::get_table_state(client, table_name).await? {
            if state.status == TableStatus::Active
                && state.gsis.iter().all(|g| g.status == GsiStatus::Active)
            {
                return Ok(());
            }
        }
        tokio::time::sleep(delay).await;
    }

    Err(DynamodbError::TableActivationTimeout {
        table_name: table_name.to_string(),
    })
}

fn to_scalar_type(attr_type: &config::AttributeType) -> ScalarAttributeType {
    match attr_type {
        config::AttributeType::String => ScalarAttributeType::S,
    }
}
