//! # folio-store: Persistence Layer for Folio
//!
//! This crate provides file persistence for the Folio bookstore core.
//! State lives in JSON snapshot files: a catalog, an append-only
//! transaction ledger, and the derived sales report.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Folio Data Flow                                 │
//! │                                                                         │
//! │  folio-engine (checkout / rebuild)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   folio-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────────────────────┐  │   │
//! │  │   │   FileStore   │    │           Repositories             │  │   │
//! │  │   │   (file.rs)   │    │                                    │  │   │
//! │  │   │               │    │  CatalogStore  - books.json        │  │   │
//! │  │   │ JSON arrays   │◄───│  LedgerStore   - transactions.json │  │   │
//! │  │   │ atomic saves  │    │  ReportStore   - sales.json        │  │   │
//! │  │   │ record decode │    │                                    │  │   │
//! │  │   └───────────────┘    └────────────────────────────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Data Directory                              │   │
//! │  │   books.json    transactions.json    sales.json                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`file`] - The generic snapshot store (config, atomic save, tolerant load)
//! - [`error`] - Store error types
//! - [`repository`] - Typed stores (catalog, ledger, report)
//!
//! ## Strict vs Tolerant Loads
//!
//! A resource can contain individually malformed records (hand-edited files,
//! partial writes from other tools). Two load policies exist:
//!
//! - **Tolerant** ([`file::FileStore::load`]): malformed records are excluded
//!   from the result and reported - each one logged, all of them returned to
//!   the caller as [`file::RejectedRecord`]s. Used by read-only consumers.
//! - **Strict** ([`file::FileStore::load_strict`]): any malformed record is
//!   an error. Used by writers: a full-snapshot save after a partial load
//!   would silently destroy the records that failed to decode.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_store::{FileStore, StoreConfig};
//! use folio_store::repository::catalog::CatalogStore;
//!
//! let files = FileStore::new(StoreConfig::new("./data")).await?;
//! let catalog_store = CatalogStore::new(files.clone());
//!
//! let catalog = catalog_store.load().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use file::{FileStore, Loaded, RejectedRecord, StoreConfig};

// Repository re-exports for convenience
pub use repository::catalog::CatalogStore;
pub use repository::ledger::LedgerStore;
pub use repository::report::ReportStore;
