//! Review Core
//!
//! Core types for the Code Review Assistant client.
//!
//! This crate contains:
//! - Domain types: entities returned by the review backend (User, Project, Analysis)
//! - DTOs: request bodies sent to the backend, with local validation

pub mod domain;
pub mod dto;
