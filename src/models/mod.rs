//! Response models for the group cache API
//!
//! This module defines the DTOs (Data Transfer Objects) serialized into
//! HTTP response bodies.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorResponse, GroupsResponse, HealthResponse, StatsResponse};
