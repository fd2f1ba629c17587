//! Core domain types
//!
//! Entities as the review backend returns them. Identifiers are the backend's
//! integer primary keys. Optional fields default when absent so that older or
//! partial payloads still deserialize.

pub mod analysis;
pub mod project;
pub mod user;
