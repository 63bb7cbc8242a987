//! # Store Error Types
//!
//! Error types for snapshot file operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  I/O error (std::io::Error) or decode error (serde_json::Error)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the resource name and categorization   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EngineError (folio-engine) ← What checkout/rebuild callers see         │
//! │                                                                         │
//! │  NOTE: a resource that simply doesn't exist yet is NOT an error.        │
//! │  Absent catalog = empty catalog; absent ledger = no history.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Snapshot store operation errors.
///
/// Every variant names the resource (file) involved so a failure in a
/// multi-resource operation like checkout pinpoints which write broke.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading the resource file failed.
    ///
    /// ## When This Occurs
    /// - File permissions issue
    /// - File vanished mid-read
    /// - Underlying device error
    ///
    /// Note: NotFound never surfaces here - an absent resource loads as
    /// empty instead.
    #[error("Failed to read {resource}: {source}")]
    Read {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing the resource file (or its temp sibling) failed.
    ///
    /// ## When This Occurs
    /// - Disk full
    /// - Directory permissions issue
    /// - Rename across filesystems (data_dir misconfiguration)
    #[error("Failed to write {resource}: {source}")]
    Write {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    /// The resource file exists but is not a JSON record array.
    ///
    /// ## When This Occurs
    /// - File is not valid JSON at all (truncated by an external tool)
    /// - Top-level value is an object or scalar instead of an array
    #[error("{resource} is not a record array: {detail}")]
    InvalidDocument { resource: String, detail: String },

    /// A strict load found records that fail to decode.
    ///
    /// ## When This Occurs
    /// - Hand-edited snapshot with a missing field or wrong type
    /// - A record written by an incompatible version
    ///
    /// Strict loaders refuse these because the subsequent full-snapshot
    /// save would drop the malformed records permanently.
    #[error("{resource} contains {count} malformed record(s); first at index {first_index}: {first_reason}")]
    MalformedRecords {
        resource: String,
        count: usize,
        first_index: usize,
        first_reason: String,
    },

    /// Encoding records for a save failed.
    #[error("Failed to encode {resource}: {source}")]
    Encode {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    /// The data directory could not be created.
    #[error("Failed to create data directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Creates a Read error for a resource.
    pub fn read(resource: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Read {
            resource: resource.into(),
            source,
        }
    }

    /// Creates a Write error for a resource.
    pub fn write(resource: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Write {
            resource: resource.into(),
            source,
        }
    }

    /// Creates an InvalidDocument error for a resource.
    pub fn invalid_document(resource: impl Into<String>, detail: impl Into<String>) -> Self {
        StoreError::InvalidDocument {
            resource: resource.into(),
            detail: detail.into(),
        }
    }

    /// Creates an Encode error for a resource.
    pub fn encode(resource: impl Into<String>, source: serde_json::Error) -> Self {
        StoreError::Encode {
            resource: resource.into(),
            source,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
