//! # Engine Configuration
//!
//! Configuration management for the Folio engine.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FOLIO_DATA_DIR=/var/lib/folio                                      │
//! │     FOLIO_LEDGER_FILE=ledger.json                                      │
//! │     (FOLIO_CONFIG points at an alternate config file)                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/folio/folio.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.folio-shop.folio (macOS)         │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Platform data dir, books.json / transactions.json / sales.json     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # folio.toml
//! [store]
//! data_dir = "/var/lib/folio"
//! catalog_file = "books.json"
//! ledger_file = "transactions.json"
//! report_file = "sales.json"
//!
//! [checkout]
//! max_cart_lines = 100
//! max_line_quantity = 999
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use folio_core::{MAX_CART_LINES, MAX_LINE_QUANTITY};
use folio_store::file::{
    StoreConfig, DEFAULT_CATALOG_FILE, DEFAULT_LEDGER_FILE, DEFAULT_REPORT_FILE,
};

use crate::error::{EngineError, EngineResult};

// =============================================================================
// Store Settings
// =============================================================================

/// Where the snapshot files live and what they are called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Directory holding the catalog, ledger, and report files.
    /// Defaults to the platform data directory.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Catalog resource file name.
    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,

    /// Transaction ledger resource file name.
    #[serde(default = "default_ledger_file")]
    pub ledger_file: String,

    /// Sales report resource file name.
    #[serde(default = "default_report_file")]
    pub report_file: String,
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "folio-shop", "folio")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"))
}

fn default_catalog_file() -> String {
    DEFAULT_CATALOG_FILE.to_string()
}

fn default_ledger_file() -> String {
    DEFAULT_LEDGER_FILE.to_string()
}

fn default_report_file() -> String {
    DEFAULT_REPORT_FILE.to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            data_dir: default_data_dir(),
            catalog_file: default_catalog_file(),
            ledger_file: default_ledger_file(),
            report_file: default_report_file(),
        }
    }
}

// =============================================================================
// Checkout Settings
// =============================================================================

/// Checkout guard rails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Maximum lines in one checkout cart.
    #[serde(default = "default_max_cart_lines")]
    pub max_cart_lines: usize,

    /// Maximum quantity of a single title in one cart line.
    #[serde(default = "default_max_line_quantity")]
    pub max_line_quantity: u32,
}

fn default_max_cart_lines() -> usize {
    MAX_CART_LINES
}

fn default_max_line_quantity() -> u32 {
    MAX_LINE_QUANTITY
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        CheckoutSettings {
            max_cart_lines: default_max_cart_lines(),
            max_line_quantity: default_max_line_quantity(),
        }
    }
}

// =============================================================================
// Main Engine Configuration
// =============================================================================

/// Complete engine configuration.
///
/// ## Example Config File
/// ```toml
/// [store]
/// data_dir = "/var/lib/folio"
/// catalog_file = "books.json"
/// ledger_file = "transactions.json"
/// report_file = "sales.json"
///
/// [checkout]
/// max_cart_lines = 100
/// max_line_quantity = 999
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Snapshot file locations.
    #[serde(default)]
    pub store: StoreSettings,

    /// Checkout guard rails.
    #[serde(default)]
    pub checkout: CheckoutSettings,
}

impl EngineConfig {
    /// Creates a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else `FOLIO_CONFIG`, else folio.toml
    ///    in the platform config directory)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> EngineResult<Self> {
        let mut config = Self::default();

        // Try to load from config file
        let path = config_path
            .or_else(|| std::env::var("FOLIO_CONFIG").ok().map(PathBuf::from))
            .or_else(Self::default_config_path);
        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading engine config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        // Override with environment variables
        config.apply_env_overrides();

        // Validate the configuration
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load engine config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> EngineResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| EngineError::ConfigSaveFailed("No config path available".into()))?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| EngineError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| EngineError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Engine config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> EngineResult<()> {
        // Every resource needs a file name
        for (label, name) in [
            ("catalog_file", &self.store.catalog_file),
            ("ledger_file", &self.store.ledger_file),
            ("report_file", &self.store.report_file),
        ] {
            if name.trim().is_empty() {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must not be empty",
                    label
                )));
            }
        }

        // Two resources sharing one file would overwrite each other
        if self.store.catalog_file == self.store.ledger_file
            || self.store.catalog_file == self.store.report_file
            || self.store.ledger_file == self.store.report_file
        {
            return Err(EngineError::InvalidConfig(
                "catalog_file, ledger_file, and report_file must be distinct".into(),
            ));
        }

        if self.checkout.max_cart_lines == 0 {
            return Err(EngineError::InvalidConfig(
                "max_cart_lines must be greater than 0".into(),
            ));
        }

        if self.checkout.max_line_quantity == 0 {
            return Err(EngineError::InvalidConfig(
                "max_line_quantity must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // Data directory
        if let Ok(dir) = std::env::var("FOLIO_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data directory from environment");
            self.store.data_dir = PathBuf::from(dir);
        }

        // Resource file names
        if let Ok(name) = std::env::var("FOLIO_CATALOG_FILE") {
            self.store.catalog_file = name;
        }
        if let Ok(name) = std::env::var("FOLIO_LEDGER_FILE") {
            self.store.ledger_file = name;
        }
        if let Ok(name) = std::env::var("FOLIO_REPORT_FILE") {
            self.store.report_file = name;
        }

        // Checkout limits
        if let Ok(lines) = std::env::var("FOLIO_MAX_CART_LINES") {
            if let Ok(n) = lines.parse::<usize>() {
                debug!(max_cart_lines = n, "Overriding cart limit from environment");
                self.checkout.max_cart_lines = n;
            }
        }
        if let Ok(qty) = std::env::var("FOLIO_MAX_LINE_QUANTITY") {
            if let Ok(n) = qty.parse::<u32>() {
                debug!(max_line_quantity = n, "Overriding quantity limit from environment");
                self.checkout.max_line_quantity = n;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "folio-shop", "folio").map(|dirs| {
            let config_dir = dirs.config_dir();
            config_dir.join("folio.toml")
        })
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.store.data_dir
    }

    /// Lowers the `[store]` section into a snapshot store configuration.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.store.data_dir.clone())
            .catalog_file(self.store.catalog_file.clone())
            .ledger_file(self.store.ledger_file.clone())
            .report_file(self.store.report_file.clone())
    }
}
