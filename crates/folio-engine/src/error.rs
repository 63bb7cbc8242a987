//! # Engine Error Types
//!
//! Error types for checkout and aggregation orchestration.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Engine Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Checkout     │  │       Storage           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Rejected       │  │  Store (wraps the       │ │
//! │  │  ConfigLoad     │  │  (bad username, │  │  folio-store error:     │ │
//! │  │  ConfigSave     │  │   oversized     │  │  read/write failures,   │ │
//! │  │                 │  │   cart)         │  │  malformed records)     │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  A cart LINE failing (missing title, short stock) is never an error:   │
//! │  it is reported as a LineOutcome in the receipt. These variants cover  │
//! │  the cases where a whole operation cannot proceed.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use folio_core::error::ValidationError;
use folio_store::StoreError;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error type covering checkout, aggregation, and config failures.
///
/// ## Design Principles
/// - Each variant includes enough context for debugging
/// - Errors are categorized for different handling strategies
/// - All errors are `Send + Sync` for async compatibility
#[derive(Debug, Error)]
pub enum EngineError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid engine configuration.
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Checkout Errors
    // =========================================================================
    /// The checkout request was rejected before any state was touched.
    ///
    /// Raised for a bad username or an oversized cart. Nothing has been
    /// loaded, decremented, or written when this is returned.
    #[error("Checkout rejected: {0}")]
    Rejected(#[from] ValidationError),

    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// A snapshot store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(err: toml::de::Error) -> Self {
        EngineError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for EngineError {
    fn from(err: toml::ser::Error) -> Self {
        EngineError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl EngineError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidConfig(_)
                | EngineError::ConfigLoadFailed(_)
                | EngineError::ConfigSaveFailed(_)
        )
    }

    /// Returns true if this error is a pre-flight checkout rejection.
    ///
    /// A rejected checkout left every snapshot file untouched; the caller
    /// can fix the request and resubmit.
    pub fn is_rejection(&self) -> bool {
        matches!(self, EngineError::Rejected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_category() {
        let err = EngineError::Rejected(ValidationError::Required {
            field: "username".to_string(),
        });
        assert!(err.is_rejection());
        assert!(!err.is_config_error());
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn test_config_category() {
        assert!(EngineError::InvalidConfig("bad".into()).is_config_error());
        assert!(EngineError::ConfigLoadFailed("missing".into()).is_config_error());
        assert!(!EngineError::ConfigLoadFailed("missing".into()).is_rejection());
    }

    #[test]
    fn test_validation_error_converts() {
        let err: EngineError = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .into();
        assert!(matches!(err, EngineError::Rejected(_)));
    }
}
