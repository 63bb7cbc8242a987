//! # folio-engine: Checkout and Aggregation Engine for Folio
//!
//! This crate wires the pure core to the snapshot stores. It owns the two
//! operations that touch state: running a checkout and rebuilding the
//! sales report.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Folio Engine                                     │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │      PurchaseProcessor       │   │       SalesAggregator        │   │
//! │  │      (checkout.rs)           │   │       (aggregator.rs)        │   │
//! │  │                              │   │                              │   │
//! │  │  validate cart               │   │  skip if ledger absent       │   │
//! │  │  ── critical section ──      │   │  load ledger (tolerant)      │   │
//! │  │  load catalog + ledger       │   │  aggregate (pure)            │   │
//! │  │  apply lines, freeze prices  │   │  save report snapshot        │   │
//! │  │  save catalog, then ledger   │   │                              │   │
//! │  └──────────────┬───────────────┘   └──────────────┬───────────────┘   │
//! │                 │                                  │                   │
//! │                 ▼                                  ▼                   │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        folio-store                              │   │
//! │  │      books.json        transactions.json        sales.json      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  EngineConfig (config.rs): TOML file + FOLIO_* env overrides,          │
//! │  lowered into the store configuration.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`checkout`] - The purchase processor (cart to receipt)
//! - [`aggregator`] - The sales report rebuild
//! - [`config`] - Engine configuration (TOML + environment)
//! - [`error`] - Engine error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_engine::{EngineConfig, PurchaseProcessor, SalesAggregator};
//! use folio_store::{CatalogStore, FileStore, LedgerStore, ReportStore};
//! use folio_core::types::CartLine;
//!
//! let config = EngineConfig::load_or_default(None);
//! let files = FileStore::new(config.store_config()).await?;
//!
//! let processor = PurchaseProcessor::with_settings(
//!     CatalogStore::new(files.clone()),
//!     LedgerStore::new(files.clone()),
//!     config.checkout.clone(),
//! );
//!
//! let cart = vec![CartLine::new("Dune", 2)?];
//! let receipt = processor.checkout("alice", &cart).await?;
//! println!("charged {}", receipt.total());
//!
//! let aggregator = SalesAggregator::new(
//!     LedgerStore::new(files.clone()),
//!     ReportStore::new(files),
//! );
//! aggregator.rebuild().await?;
//! ```

use tracing_subscriber::EnvFilter;

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregator;
pub mod checkout;
pub mod config;
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use aggregator::{RebuildOutcome, RebuildSummary, SalesAggregator};
pub use checkout::PurchaseProcessor;
pub use config::{CheckoutSettings, EngineConfig, StoreSettings};
pub use error::{EngineError, EngineResult};

// =============================================================================
// Tracing Setup
// =============================================================================

/// Initializes the tracing subscriber for embedders and tests.
///
/// ## Environment Variables
/// - `RUST_LOG=debug` - Show debug logs for everything
/// - `RUST_LOG=folio=trace` - Show trace for folio crates only
/// - Default: INFO level, DEBUG for folio crates
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,folio=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .ok();
}
