//! Response DTOs for the group cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::GroupStats;

/// Response body for the stats endpoint (GET /stats/:group)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Group the figures belong to
    pub group: String,
    /// Counters and cache occupancy
    #[serde(flatten)]
    pub stats: GroupStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a group's statistics
    pub fn new(group: impl Into<String>, stats: GroupStats) -> Self {
        Self {
            group: group.into(),
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Response body for the group listing (GET /groups)
#[derive(Debug, Clone, Serialize)]
pub struct GroupsResponse {
    /// Registered group names, sorted
    pub groups: Vec<String>,
}

impl GroupsResponse {
    pub fn new(groups: Vec<String>) -> Self {
        Self { groups }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
