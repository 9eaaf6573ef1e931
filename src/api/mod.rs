//! API Module
//!
//! HTTP handlers and routing for the group cache REST API.
//!
//! # Endpoints
//! - `GET /api/:group/:key` - Fetch a value through a group
//! - `GET /api/:group/` - Empty key, rejected with 400
//! - `GET /stats/:group` - Get a group's statistics
//! - `GET /groups` - List registered groups
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
