//! Registry configuration

use std::path::PathBuf;

use serde::Deserialize;

use core_kernel::{CoreError, FileStore};
use domain_party::DEFAULT_STORAGE_KEY;

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistryConfig {
    /// Directory holding the storage slots
    pub storage_dir: PathBuf,
    /// Slot the party collection is written to
    pub storage_key: String,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// Seed sample records when the registry is empty
    pub seed_on_start: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("./data"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: "info".to_string(),
            log_json: false,
            seed_on_start: true,
        }
    }
}

impl RegistryConfig {
    /// Loads configuration from `REGISTRY_*` environment variables
    ///
    /// * `REGISTRY_STORAGE_DIR` - slot directory (default: ./data)
    /// * `REGISTRY_STORAGE_KEY` - slot name (default: partes_interessadas)
    /// * `REGISTRY_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
    /// * `REGISTRY_LOG_JSON` - true/false (default: false)
    /// * `REGISTRY_SEED_ON_START` - true/false (default: true)
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_source(config::Environment::with_prefix("REGISTRY"))
    }

    /// Loads configuration from any `config` source layered over the defaults
    pub fn from_source<S>(source: S) -> Result<Self, CoreError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("storage_dir", defaults.storage_dir.to_string_lossy().to_string())
            .and_then(|b| b.set_default("storage_key", defaults.storage_key))
            .and_then(|b| b.set_default("log_level", defaults.log_level))
            .and_then(|b| b.set_default("log_json", defaults.log_json))
            .and_then(|b| b.set_default("seed_on_start", defaults.seed_on_start))
            .map_err(|e| CoreError::configuration(e.to_string()))?
            .add_source(source)
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))
    }

    /// Opens the file store for the configured directory
    ///
    /// Fails when the storage key cannot name a slot file, which would
    /// otherwise make every read and write of the registry fail.
    pub fn file_store(&self) -> Result<FileStore, CoreError> {
        let store = FileStore::new(&self.storage_dir);
        store.slot_path(&self.storage_key)?;
        Ok(store)
    }
}
