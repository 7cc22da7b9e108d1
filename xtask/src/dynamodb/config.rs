//! Table configuration types (Functional Core - pure data).

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub gsis: Vec<GsiConfig>,
    /// Epoch-seconds attribute DynamoDB uses to expire items.
    pub ttl_attribute: Option<String>,
    pub billing_mode: BillingMode,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// DynamoDB attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
}

/// Global Secondary Index configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsiConfig {
    pub name: String,
    pub partition_key: KeyAttribute,
    pub projection: ProjectionType,
}

/// GSI projection type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionType {
    All,
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
}

fn string_key(name: &str) -> KeyAttribute {
    KeyAttribute {
        name: name.to_string(),
        attribute_type: AttributeType::String,
    }
}

fn gsi(name: &str, attribute: &str) -> GsiConfig {
    GsiConfig {
        name: name.to_string(),
        partition_key: string_key(attribute),
        projection: ProjectionType::All,
    }
}

fn table(prefix: &str, entity: &str, gsis: Vec<GsiConfig>) -> TableConfig {
    TableConfig {
        table_name: format!("{prefix}-{entity}"),
        partition_key: string_key("id"),
        gsis,
        ttl_attribute: None,
        billing_mode: BillingMode::PayPerRequest,
    }
}

/// Returns the table configurations for boatrent, one per entity.
///
/// Names are `<prefix>-<entity>`, matching the server's default
/// `DYNAMODB_TABLE_*` values when the prefix is `boatrent`.
pub fn boatrent_table_configs(prefix: &str) -> Vec<TableConfig> {
    let mut reservations = table(prefix, "reservations", vec![gsi("boatId-index", "boatId")]);
    reservations.ttl_attribute = Some("ttl".to_string());

    vec![
        table(prefix, "users", vec![gsi("email-index", "email")]),
        table(prefix, "boats", vec![]),
        table(
            prefix,
            "bookings",
            vec![gsi("userId-index", "userId"), gsi("boatId-index", "boatId")],
        ),
        reservations,
        table(prefix, "payments", vec![gsi("bookingId-index", "bookingId")]),
        table(prefix, "reviews", vec![gsi("boatId-index", "boatId")]),
        table(prefix, "notifications", vec![gsi("userId-index", "userId")]),
    ]
}

/// Name of the boats table for `prefix`.
pub fn boats_table(prefix: &str) -> String {
    format!("{prefix}-boats")
}

pub fn users_table(prefix: &str) -> String {
    format!("{prefix}-users")
}
