//! # Points API
//!
//! HTTP front end for the receipt points service.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Points API Server                                │
//! │                                                                         │
//! │  Client ───► axum (8080) ───► ReceiptService ───► MemoryStore           │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                               points-core                               │
//! │                              (scoring rules)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `POINTS_API_BIND_ADDR` - Interface to bind (default: 0.0.0.0)
//! - `POINTS_API_PORT` - HTTP port (default: 8080)
//! - `POINTS_API_STRICT` - Reject malformed amounts/dates/times (default: false)
//! - `POINTS_API_MAX_BODY_BYTES` - Request body limit (default: 1048576)
//! - `RUST_LOG` - Log filter (default: info)

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use points_store::{MemoryStore, ReceiptService};

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use routes::{create_router, PointsResponse, ProcessResponse};

/// Service type the binary runs with.
pub type SharedService = Arc<ReceiptService<MemoryStore>>;

/// Builds a fresh, empty in-memory service configured from `config`.
pub fn build_service(config: &ApiConfig) -> SharedService {
    Arc::new(ReceiptService::new(MemoryStore::new()).with_policy(config.validation_policy()))
}

/// Builds the full application router from configuration.
pub fn build_app(config: &ApiConfig) -> Router {
    create_router(build_service(config), config.max_body_bytes)
}
