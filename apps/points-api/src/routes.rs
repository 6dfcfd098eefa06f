//! # HTTP Routes
//!
//! ```text
//! POST /receipts/process        body: Receipt JSON  → {"id": "..."}
//! GET  /receipts/{id}/points                        → {"points": N}
//! ```
//!
//! Handlers are thin: decode the request, call the service, map the error.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    routing::{get, post},
    Json, Router,
};
use points_store::{ReceiptService, ReceiptStore};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;

/// Response for `POST /receipts/process`.
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub id: String,
}

/// Response for `GET /receipts/{id}/points`.
#[derive(Debug, Serialize)]
pub struct PointsResponse {
    pub points: u64,
}

/// Builds the router over any store implementation.
pub fn create_router<S>(service: Arc<ReceiptService<S>>, max_body_bytes: usize) -> Router
where
    S: ReceiptStore + 'static,
{
    Router::new()
        .route("/receipts/process", post(process_receipt::<S>))
        .route("/receipts/{id}/points", get(get_points::<S>))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(service)
}

/// The body is taken as raw bytes so the service, not the framework,
/// decides what counts as a malformed receipt.
async fn process_receipt<S>(
    State(service): State<Arc<ReceiptService<S>>>,
    body: Bytes,
) -> Result<Json<ProcessResponse>, ApiError>
where
    S: ReceiptStore + 'static,
{
    debug!(bytes = body.len(), "POST /receipts/process");
    let id = service.process_json(&body)?;

    Ok(Json(ProcessResponse { id: id.to_string() }))
}

async fn get_points<S>(
    State(service): State<Arc<ReceiptService<S>>>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>, ApiError>
where
    S: ReceiptStore + 'static,
{
    debug!(id = %id, "GET /receipts/{{id}}/points");
    let points = service.lookup(&id)?;

    Ok(Json(PointsResponse { points }))
}
