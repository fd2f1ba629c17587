//! Data Transfer Objects for the review backend API
//!
//! Request bodies sent by the client and the small response envelopes that
//! are not domain entities. Request DTOs that the user fills in derive
//! [`validator::Validate`] so that bad input is rejected before any request
//! leaves the machine.

pub mod analysis;
pub mod auth;
pub mod project;

use serde::{Deserialize, Serialize};

/// Response of the backend's `/health` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
