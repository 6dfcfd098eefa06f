//! # Store Error Types
//!
//! Error types for the receipt store and service.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (points-core: malformed body, strict validation)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds lookup / insert failures              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in points-api) ← status code + JSON body                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use points_core::CoreError;
use thiserror::Error;

/// Receipt store and service errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record for this identifier.
    ///
    /// ## When This Occurs
    /// - The id was never issued by this process
    /// - The id was issued by a previous run (nothing is persisted)
    /// - The id is not a UUID at all
    #[error("Receipt not found: {id}")]
    NotFound { id: String },

    /// An insert collided with an existing identifier.
    ///
    /// Records are never overwritten. With random v4 ids this signals a
    /// caller re-inserting the same record, not a real collision.
    #[error("Duplicate receipt id: {id}")]
    DuplicateId { id: String },

    /// A thread panicked while holding the store lock.
    #[error("Receipt store lock poisoned")]
    LockPoisoned,

    /// The receipt itself was rejected before touching the store.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Creates a not-found error for the given id text.
    pub fn not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound { id: id.into() }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
