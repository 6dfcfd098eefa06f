//! # points-store: Receipt Store for the Points Service
//!
//! Maps opaque receipt identifiers to their computed points and exposes the
//! `process` / `lookup` pair the HTTP layer calls.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Receipt Points Data Flow                         │
//! │                                                                         │
//! │  HTTP handler (POST /receipts/process)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  points-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────────┐          ┌───────────────────────┐     │   │
//! │  │   │  ReceiptService   │          │  trait ReceiptStore   │     │   │
//! │  │   │  (service.rs)     │─────────►│  (store.rs)           │     │   │
//! │  │   │                   │          │                       │     │   │
//! │  │   │  process          │          │  MemoryStore          │     │   │
//! │  │   │  lookup           │          │  RwLock<HashMap>      │     │   │
//! │  │   └─────────┬─────────┘          └───────────────────────┘     │   │
//! │  │             │ compute points                                    │   │
//! │  └─────────────┼───────────────────────────────────────────────────┘   │
//! │                ▼                                                        │
//! │           points-core (pure)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use points_store::{MemoryStore, ReceiptService};
//!
//! let service = ReceiptService::new(MemoryStore::new());
//! let id = service
//!     .process_json(br#"{"retailer":"Target","purchaseDate":"2022-01-02",
//!         "purchaseTime":"10:00","items":[],"total":"1.10"}"#)
//!     .unwrap();
//!
//! assert_eq!(service.lookup(&id.to_string()).unwrap(), 6);
//! assert!(service.lookup("unknown").is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod service;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use service::ReceiptService;
pub use store::{MemoryStore, ReceiptStore};
