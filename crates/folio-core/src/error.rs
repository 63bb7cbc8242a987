//! # Error Types
//!
//! Domain-specific error types for folio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  folio-core errors (this file)                                          │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  folio-store errors (separate crate)                                    │
//! │  └── StoreError       - Snapshot file operation failures                │
//! │                                                                         │
//! │  folio-engine errors (separate crate)                                   │
//! │  └── EngineError      - Checkout / aggregation orchestration failures   │
//! │                                                                         │
//! │  Flow: ValidationError ──► EngineError::Rejected ──► caller             │
//! │        StoreError      ──► EngineError::Store    ──► caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A checkout *line* failing (title missing, not enough stock) is not an
//! error at all - it becomes a [`crate::types::LineOutcome`]. Errors here
//! cover input that is invalid before any business logic runs.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (title, quantity, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs: the validating
/// constructors ([`crate::types::CartLine::new`], [`crate::date::TxnDate`]
/// parsing) and the checkout pre-flight all reject with this type.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., a date that is not MM-DD-YYYY).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
