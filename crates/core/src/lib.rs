//! boatrent_core - pure domain logic for the boatrent backend.
//!
//! Everything in this crate is free of I/O: entity types, request payloads,
//! validation, availability and status rules, pricing, the simulated payment
//! flows, token claims, and the repository traits the server implements.

pub mod auth;
pub mod rental;
pub mod serde;
pub mod storage;
