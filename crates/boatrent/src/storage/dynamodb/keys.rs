//! Table key and index names.
//!
//! Every table is keyed on a string `id`. Secondary lookups go through the
//! GSIs named here, each keyed on a single string attribute.

/// Partition key attribute shared by all tables.
pub const ID: &str = "id";

pub const EMAIL_INDEX: &str = "email-index";
pub const USER_ID_INDEX: &str = "userId-index";
pub const BOAT_ID_INDEX: &str = "boatId-index";
pub const BOOKING_ID_INDEX: &str = "bookingId-index";

pub const EMAIL_ATTR: &str = "email";
pub const USER_ID_ATTR: &str = "userId";
pub const BOAT_ID_ATTR: &str = "boatId";
pub const BOOKING_ID_ATTR: &str = "bookingId";

/// A GSI together with the attribute it is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index {
    pub name: &'static str,
    pub attribute: &'static str,
}

pub const BY_EMAIL: Index = Index {
    name: EMAIL_INDEX,
    attribute: EMAIL_ATTR,
};

pub const BY_USER: Index = Index {
    name: USER_ID_INDEX,
    attribute: USER_ID_ATTR,
};

pub const BY_BOAT: Index = Index {
    name: BOAT_ID_INDEX,
    attribute: BOAT_ID_ATTR,
};

pub const BY_BOOKING: Index = Index {
    name: BOOKING_ID_INDEX,
    attribute: BOOKING_ID_ATTR,
};

/// Condition for creating an item that must not exist yet.
pub const CREATE_CONDITION: &str = "attribute_not_exists(id)";

/// Condition for overwriting an item that must already exist.
pub const UPDATE_CONDITION: &str = "attribute_exists(id)";

/// Condition for a booking write that only lands if neither status moved.
pub const STATUS_CONDITION: &str =
    "attribute_exists(id) AND #status = :status AND #paymentStatus = :paymentStatus";
