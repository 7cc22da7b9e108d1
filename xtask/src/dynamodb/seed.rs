//! Seed command implementation.

use super::error::{DynamodbError, Result};
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use boatrent_core::rental::{Boat, Role};
use std::collections::HashMap;

/// Convert a Boat to a DynamoDB item, using the server's attribute names.
fn boat_to_item(boat: &Boat) -> HashMap<String, AttributeValue> {
    let strings = |values: &[String]| {
        AttributeValue::L(values.iter().cloned().map(AttributeValue::S).collect())
    };

    let mut item = HashMap::from([
        ("id".to_string(), AttributeValue::S(boat.id.to_string())),
        (
            "ownerId".to_string(),
            AttributeValue::S(boat.owner_id.to_string()),
        ),
        ("name".to_string(), AttributeValue::S(boat.name.clone())),
        (
            "boatType".to_string(),
            AttributeValue::S(boat.boat_type.as_str().to_string()),
        ),
        (
            "location".to_string(),
            AttributeValue::S(boat.location.clone()),
        ),
        (
            "capacity".to_string(),
            AttributeValue::N(boat.capacity.to_string()),
        ),
        (
            "pricePerDayCents".to_string(),
            AttributeValue::N(boat.price_per_day_cents.to_string()),
        ),
        ("amenities".to_string(), strings(&boat.amenities)),
        ("images".to_string(), strings(&boat.images)),
        ("available".to_string(), AttributeValue::Bool(boat.available)),
        (
            "reviewCount".to_string(),
            AttributeValue::N(boat.review_count.to_string()),
        ),
        (
            "createdAt".to_string(),
            AttributeValue::S(boat.created_at.to_rfc3339()),
        ),
        (
            "updatedAt".to_string(),
            AttributeValue::S(boat.updated_at.to_rfc3339()),
        ),
    ]);

    if let Some(description) = &boat.description {
        item.insert(
            "description".to_string(),
            AttributeValue::S(description.clone()),
        );
    }

    item
}

/// Whether a stored `role` may own boats.
pub fn may_own_boats(role: &str) -> bool {
    [Role::Customer, Role::Owner, Role::Admin]
        .into_iter()
        .any(|r| r.can_manage_boats() && r.as_str() == role)
}

/// Insert boats into DynamoDB.
pub async fn seed_boats(client: &Client, table_name: &str, boats: &[Boat]) -> Result<u32> {
    let mut inserted = 0;

    // BatchWriteItem accepts at most 25 items
    for chunk in boats.chunks(25) {
        let write_requests = chunk
            .iter()
            .map(|boat| {
                let put = PutRequest::builder()
                    .set_item(Some(boat_to_item(boat)))
                    .build()
                    .map_err(DynamodbError::sdk)?;
                Ok(WriteRequest::builder().put_request(put).build())
            })
            .collect::<Result<Vec<_>>>()?;

        client
            .batch_write_item()
            .request_items(table_name, write_requests)
            .send()
            .await
            .map_err(DynamodbError::sdk)?;

        inserted += chunk.len() as u32;
    }

    Ok(inserted)
}
