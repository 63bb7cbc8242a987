//! # Snapshot File Store
//!
//! The generic record store every repository sits on: named resources in a
//! data directory, each one a JSON array of records, always written whole.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Snapshot File Store                                │
//! │                                                                         │
//! │  Engine Startup                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new(data_dir) ← Configure directory + resource names      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  FileStore::new(config).await ← Ensure the data directory exists        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │              Data Directory             │                            │
//! │  │  books.json  transactions.json  ...     │  (one file per resource)   │
//! │  └─────────────────────────────────────────┘                            │
//! │                                                                         │
//! │  load(resource)  ──► read file ──► decode records one by one            │
//! │                      absent file = empty resource (first run)           │
//! │                                                                         │
//! │  save(resource)  ──► write <resource>.tmp ──► rename over the original  │
//! │                      rename is atomic: a crash mid-save leaves the      │
//! │                      previous snapshot intact, never a half-written one │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Malformed Records
//! Decoding is per-record: one bad element doesn't poison the file. Each
//! rejected record is logged with its index and reason and handed back in
//! [`Loaded::rejected`] - excluded from the result, never silently replaced
//! with a default. Writers use [`FileStore::load_strict`] instead, which
//! turns any rejection into an error (see crate docs).

use std::io::ErrorKind;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Defaults
// =============================================================================

/// Default catalog resource name.
pub const DEFAULT_CATALOG_FILE: &str = "books.json";

/// Default transaction ledger resource name.
pub const DEFAULT_LEDGER_FILE: &str = "transactions.json";

/// Default sales report resource name.
pub const DEFAULT_REPORT_FILE: &str = "sales.json";

// =============================================================================
// Configuration
// =============================================================================

/// Snapshot store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("./data")
///     .catalog_file("catalog.json")
///     .ledger_file("ledger.json");
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding all resource files.
    pub data_dir: PathBuf,

    /// Catalog resource file name.
    /// Default: "books.json"
    pub catalog_file: String,

    /// Transaction ledger resource file name.
    /// Default: "transactions.json"
    pub ledger_file: String,

    /// Sales report resource file name.
    /// Default: "sales.json"
    pub report_file: String,

    /// Whether to create the data directory on startup.
    /// Default: true
    pub create_dir: bool,
}

impl StoreConfig {
    /// Creates a new store configuration with the given data directory.
    ///
    /// ## Arguments
    /// * `data_dir` - Directory for the resource files. Created on startup
    ///   if it doesn't exist (unless disabled).
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            catalog_file: DEFAULT_CATALOG_FILE.to_string(),
            ledger_file: DEFAULT_LEDGER_FILE.to_string(),
            report_file: DEFAULT_REPORT_FILE.to_string(),
            create_dir: true,
        }
    }

    /// Sets the catalog resource file name.
    pub fn catalog_file(mut self, name: impl Into<String>) -> Self {
        self.catalog_file = name.into();
        self
    }

    /// Sets the ledger resource file name.
    pub fn ledger_file(mut self, name: impl Into<String>) -> Self {
        self.ledger_file = name.into();
        self
    }

    /// Sets the report resource file name.
    pub fn report_file(mut self, name: impl Into<String>) -> Self {
        self.report_file = name.into();
        self
    }

    /// Sets whether to create the data directory on startup.
    pub fn create_dir(mut self, create: bool) -> Self {
        self.create_dir = create;
        self
    }
}

// =============================================================================
// Loaded Records
// =============================================================================

/// One record that failed to decode during a tolerant load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Position of the record in the resource array.
    pub index: usize,

    /// Decoder error message.
    pub reason: String,
}

/// The result of a tolerant load: the records that decoded, plus the
/// diagnostics for every record that didn't.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    /// Successfully decoded records, in file order.
    pub records: Vec<T>,

    /// Records excluded because they failed to decode.
    pub rejected: Vec<RejectedRecord>,
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Loaded {
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<T> Loaded<T> {
    /// True if every record in the resource decoded.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

// =============================================================================
// File Store
// =============================================================================

/// Generic snapshot store over named JSON resources in one data directory.
///
/// Cheap to clone: repositories each hold their own handle.
///
/// ## Usage
/// ```rust,ignore
/// let files = FileStore::new(StoreConfig::new("./data")).await?;
///
/// let loaded = files.load::<Book>("books.json").await?;
/// files.save("books.json", &loaded.records).await?;
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    config: StoreConfig,
}

impl FileStore {
    /// Creates a new store handle, ensuring the data directory exists.
    ///
    /// ## What This Does
    /// 1. Creates the data directory (and parents) if configured to
    /// 2. Nothing else - resource files appear lazily on first save
    pub async fn new(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.data_dir.display(),
            "Initializing snapshot store"
        );

        if config.create_dir {
            tokio::fs::create_dir_all(&config.data_dir)
                .await
                .map_err(|e| StoreError::CreateDir {
                    path: config.data_dir.display().to_string(),
                    source: e,
                })?;
        }

        Ok(FileStore { config })
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Full path of a resource file.
    pub fn path_for(&self, resource: &str) -> PathBuf {
        self.config.data_dir.join(resource)
    }

    /// Checks whether a resource file exists on disk.
    ///
    /// Absent is a normal state (nothing has been saved yet), but some
    /// callers branch on it - the report rebuild skips entirely when the
    /// ledger resource has never been created.
    pub async fn exists(&self, resource: &str) -> bool {
        tokio::fs::try_exists(self.path_for(resource))
            .await
            .unwrap_or(false)
    }

    /// Loads a resource tolerantly.
    ///
    /// ## Behavior
    /// - Absent file → empty [`Loaded`] (not an error)
    /// - File that isn't a JSON array → [`StoreError::InvalidDocument`]
    /// - Records decoded one by one; failures are logged, excluded, and
    ///   returned in [`Loaded::rejected`]
    pub async fn load<T: DeserializeOwned>(&self, resource: &str) -> StoreResult<Loaded<T>> {
        let path = self.path_for(resource);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(resource, "Resource absent - loading as empty");
                return Ok(Loaded::default());
            }
            Err(e) => return Err(StoreError::read(resource, e)),
        };

        let document: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::invalid_document(resource, e.to_string()))?;

        let elements = match document {
            serde_json::Value::Array(elements) => elements,
            other => {
                return Err(StoreError::invalid_document(
                    resource,
                    format!("expected a JSON array, found {}", value_kind(&other)),
                ))
            }
        };

        let mut records = Vec::with_capacity(elements.len());
        let mut rejected = Vec::new();

        for (index, element) in elements.into_iter().enumerate() {
            match serde_json::from_value::<T>(element) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(resource, index, reason = %e, "Rejecting malformed record");
                    rejected.push(RejectedRecord {
                        index,
                        reason: e.to_string(),
                    });
                }
            }
        }

        debug!(
            resource,
            count = records.len(),
            rejected = rejected.len(),
            "Loaded resource"
        );

        Ok(Loaded { records, rejected })
    }

    /// Loads a resource strictly: any malformed record is an error.
    ///
    /// ## Why Strict?
    /// This is the load for mutate-and-save paths. Saving is full-snapshot,
    /// so proceeding past a rejected record would drop it from the file on
    /// the next save. Refusing up front keeps the malformed record on disk
    /// for an operator to repair.
    pub async fn load_strict<T: DeserializeOwned>(&self, resource: &str) -> StoreResult<Vec<T>> {
        let loaded = self.load::<T>(resource).await?;

        if let Some(first) = loaded.rejected.first() {
            return Err(StoreError::MalformedRecords {
                resource: resource.to_string(),
                count: loaded.rejected.len(),
                first_index: first.index,
                first_reason: first.reason.clone(),
            });
        }

        Ok(loaded.records)
    }

    /// Saves a resource as one whole snapshot, atomically.
    ///
    /// ## Atomic Replace
    /// The records are written to `<resource>.tmp` in the same directory
    /// and renamed over the resource file. Rename within a directory is
    /// atomic, so readers see either the old snapshot or the new one -
    /// never a truncated file.
    pub async fn save<T: Serialize>(&self, resource: &str, records: &[T]) -> StoreResult<()> {
        let path = self.path_for(resource);
        let tmp_path = self.config.data_dir.join(format!("{resource}.tmp"));

        let bytes =
            serde_json::to_vec_pretty(records).map_err(|e| StoreError::encode(resource, e))?;

        tokio::fs::write(&tmp_path, &bytes)
            .await
            .map_err(|e| StoreError::write(resource, e))?;

        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| StoreError::write(resource, e))?;

        debug!(resource, count = records.len(), "Saved snapshot");

        Ok(())
    }
}

/// Human label for a JSON value's type, for InvalidDocument messages.
fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Rec {
        name: String,
        n: u32,
    }

    fn rec(name: &str, n: u32) -> Rec {
        Rec {
            name: name.to_string(),
            n,
        }
    }

    async fn store(dir: &TempDir) -> FileStore {
        FileStore::new(StoreConfig::new(dir.path())).await.unwrap()
    }

    #[tokio::test]
    async fn test_absent_resource_loads_empty() {
        let dir = TempDir::new().unwrap();
        let files = store(&dir).await;

        let loaded = files.load::<Rec>("missing.json").await.unwrap();
        assert!(loaded.records.is_empty());
        assert!(loaded.is_clean());

        assert!(!files.exists("missing.json").await);
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let files = store(&dir).await;

        let records = vec![rec("a", 1), rec("b", 2)];
        files.save("recs.json", &records).await.unwrap();

        assert!(files.exists("recs.json").await);

        let loaded = files.load::<Rec>("recs.json").await.unwrap();
        assert_eq!(loaded.records, records);
        assert!(loaded.is_clean());
    }

    #[tokio::test]
    async fn test_save_is_full_snapshot_overwrite() {
        let dir = TempDir::new().unwrap();
        let files = store(&dir).await;

        files.save("recs.json", &[rec("a", 1), rec("b", 2)]).await.unwrap();
        files.save("recs.json", &[rec("c", 3)]).await.unwrap();

        let loaded = files.load::<Rec>("recs.json").await.unwrap();
        assert_eq!(loaded.records, vec![rec("c", 3)]);
    }

    #[tokio::test]
    async fn test_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let files = store(&dir).await;

        files.save("recs.json", &[rec("a", 1)]).await.unwrap();

        assert!(!dir.path().join("recs.json.tmp").exists());
        assert!(dir.path().join("recs.json").exists());
    }

    #[tokio::test]
    async fn test_malformed_record_rejected_with_index() {
        let dir = TempDir::new().unwrap();
        let files = store(&dir).await;

        let raw = r#"[
            {"name": "a", "n": 1},
            {"bogus": true},
            {"name": "b", "n": 2}
        ]"#;
        tokio::fs::write(dir.path().join("recs.json"), raw)
            .await
            .unwrap();

        let loaded = files.load::<Rec>("recs.json").await.unwrap();
        assert_eq!(loaded.records, vec![rec("a", 1), rec("b", 2)]);
        assert_eq!(loaded.rejected.len(), 1);
        assert_eq!(loaded.rejected[0].index, 1);
        assert!(!loaded.is_clean());
    }

    #[tokio::test]
    async fn test_strict_load_errors_on_malformed() {
        let dir = TempDir::new().unwrap();
        let files = store(&dir).await;

        let raw = r#"[{"name": "a", "n": 1}, 42]"#;
        tokio::fs::write(dir.path().join("recs.json"), raw)
            .await
            .unwrap();

        let err = files.load_strict::<Rec>("recs.json").await.unwrap_err();
        match err {
            StoreError::MalformedRecords {
                resource,
                count,
                first_index,
                ..
            } => {
                assert_eq!(resource, "recs.json");
                assert_eq!(count, 1);
                assert_eq!(first_index, 1);
            }
            other => panic!("expected MalformedRecords, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_strict_load_of_absent_resource_is_empty() {
        let dir = TempDir::new().unwrap();
        let files = store(&dir).await;

        let records = files.load_strict::<Rec>("missing.json").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_non_array_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        let files = store(&dir).await;

        tokio::fs::write(dir.path().join("recs.json"), r#"{"name": "a"}"#)
            .await
            .unwrap();

        let err = files.load::<Rec>("recs.json").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidDocument { .. }));
        assert!(err.to_string().contains("an object"));
    }

    #[tokio::test]
    async fn test_unparseable_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        let files = store(&dir).await;

        tokio::fs::write(dir.path().join("recs.json"), "not json at all")
            .await
            .unwrap();

        let err = files.load::<Rec>("recs.json").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidDocument { .. }));
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = StoreConfig::new("/tmp/folio-test")
            .catalog_file("catalog.json")
            .ledger_file("ledger.json")
            .report_file("report.json");

        assert_eq!(config.catalog_file, "catalog.json");
        assert_eq!(config.ledger_file, "ledger.json");
        assert_eq!(config.report_file, "report.json");
        assert!(config.create_dir);
    }
}
