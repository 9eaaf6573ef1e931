//! API Handlers
//!
//! HTTP request handlers for each group cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{CacheError, Result};
use crate::group::{Group, GroupRegistry};
use crate::models::{GroupsResponse, HealthResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// Holds the group registry; handlers only ever look groups up by name.
#[derive(Clone)]
pub struct AppState {
    /// Registry of served groups
    pub registry: Arc<GroupRegistry>,
}

impl AppState {
    /// Creates a new AppState around the given registry.
    pub fn new(registry: Arc<GroupRegistry>) -> Self {
        Self { registry }
    }

    fn group(&self, name: &str) -> Result<Arc<Group>> {
        self.registry
            .get_group(name)
            .ok_or_else(|| CacheError::GroupNotFound(name.to_string()))
    }
}

/// Handler for GET /api/:group/:key
///
/// Returns the raw value bytes, loading them on a cache miss. Loaders are
/// synchronous, so the lookup runs on the blocking pool.
pub async fn get_handler(
    State(state): State<AppState>,
    Path((group, key)): Path<(String, String)>,
) -> Result<Response> {
    let group = state.group(&group)?;

    let value = tokio::task::spawn_blocking(move || group.get(&key))
        .await
        .map_err(|err| CacheError::Internal(err.to_string()))??;

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        value.byte_slice(),
    )
        .into_response())
}

/// Handler for GET /api/:group/
///
/// The router never matches an empty `:key` segment, so an empty key lands
/// here and is rejected the same way [`Group::get`] rejects it.
pub async fn empty_key_handler(
    State(state): State<AppState>,
    Path(group): Path<String>,
) -> Result<Response> {
    state.group(&group)?;
    Err(CacheError::InvalidKey)
}

/// Handler for GET /stats/:group
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(group): Path<String>,
) -> Result<Json<StatsResponse>> {
    let group = state.group(&group)?;
    Ok(Json(StatsResponse::new(group.name(), group.stats())))
}

/// Handler for GET /groups
pub async fn groups_handler(State(state): State<AppState>) -> Json<GroupsResponse> {
    Json(GroupsResponse::new(state.registry.names()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
