//! # Repository Module
//!
//! Typed store implementations for Folio.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Each repository pairs one resource file with the domain type it        │
//! │  holds, and picks the right load policy for its callers.               │
//! │                                                                         │
//! │  folio-engine                                                           │
//! │       │                                                                 │
//! │       │  catalog_store.load()                                           │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  CatalogStore ──────────► FileStore.load_strict::<Book>("books.json")   │
//! │  LedgerStore  ──────────► FileStore.load_strict / load  (ledger)        │
//! │  ReportStore  ──────────► FileStore.save::<YearSales>   (report)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  JSON snapshot files in the data directory                              │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Resource names and load policies live in one place                   │
//! │  • The engine never touches file paths                                  │
//! │  • Ledger-specific logic (id generation) has a natural home             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`catalog::CatalogStore`] - The book catalog (strict loads, whole saves)
//! - [`ledger::LedgerStore`] - The transaction ledger (append + id generation)
//! - [`report::ReportStore`] - The derived sales report (whole saves)

pub mod catalog;
pub mod ledger;
pub mod report;
