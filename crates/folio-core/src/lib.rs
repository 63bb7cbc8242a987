//! # folio-core: Pure Business Logic for Folio
//!
//! This crate is the **heart** of the Folio bookstore back-end. It contains
//! all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Folio Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    folio-engine (Orchestration)                 │   │
//! │  │    PurchaseProcessor ──► checkout   SalesAggregator ──► rebuild │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ folio-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │  catalog  │  │  report   │   │   │
//! │  │   │   Book    │  │   Money   │  │  Catalog  │  │SalesReport│   │   │
//! │  │   │Transaction│  │  (cents)  │  │  lookups  │  │ roll-ups  │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILE SYSTEM • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   folio-store (Persistence Layer)               │   │
//! │  │           JSON snapshot files: catalog, ledger, report          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Book, Transaction, CartLine, checkout outcomes)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`date`] - Validated MM-DD-YYYY transaction dates
//! - [`catalog`] - In-memory catalog with title lookup and stock mutation
//! - [`report`] - Pure sales aggregation (year/month/day revenue roll-ups)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: File system and network access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use folio_core::money::Money;
//! use folio_core::report::SalesReport;
//!
//! // Create money from cents (never from floats!)
//! let price = Money::from_cents(1000); // $10.00
//!
//! // A line total is always unit price × quantity
//! let total = price * 2u32;
//! assert_eq!(total.cents(), 2000);
//!
//! // Aggregation over an empty ledger is an empty report
//! let report = SalesReport::from_transactions(&[]);
//! assert!(report.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod date;
pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use folio_core::Money` instead of
// `use folio_core::money::Money`

pub use catalog::Catalog;
pub use date::TxnDate;
pub use error::ValidationError;
pub use money::Money;
pub use report::SalesReport;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single checkout cart.
///
/// ## Business Reason
/// Prevents runaway carts and keeps the checkout critical section short.
/// This is the default; the engine's checkout settings can override it.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single title in one cart line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// This is the default; the engine's checkout settings can override it.
pub const MAX_LINE_QUANTITY: u32 = 999;
