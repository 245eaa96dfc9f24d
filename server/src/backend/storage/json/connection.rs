//! JSON-file persistence for the store document.

use anyhow::{anyhow, Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::storage::document::StoreDocument;
use crate::backend::storage::traits::DocumentStore;

/// Single storage namespace: the whole store lives in this one file.
pub const DOCUMENT_FILE_NAME: &str = "centerdesk-storage.json";

/// Environment variable overriding the default data directory.
pub const DATA_DIR_ENV: &str = "CENTERDESK_DATA_DIR";

/// Manages the data directory and the store document file inside it.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a connection rooted at the given directory, creating it if
    /// needed.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_directory = base_directory.as_ref().to_path_buf();
        if !base_directory.exists() {
            fs::create_dir_all(&base_directory).with_context(|| {
                format!("failed to create data directory {}", base_directory.display())
            })?;
        }
        Ok(Self { base_directory })
    }

    /// Create a connection in the default data directory
    /// (`~/Documents/CenterDesk`), honoring the `CENTERDESK_DATA_DIR`
    /// override.
    pub fn new_default() -> Result<Self> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            info!("using data directory from {}: {}", DATA_DIR_ENV, dir);
            return Self::new(dir);
        }
        let home = dirs::home_dir().ok_or_else(|| anyhow!("could not determine home directory"))?;
        let data_dir = home.join("Documents").join("CenterDesk");
        info!("using default data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn document_path(&self) -> PathBuf {
        self.base_directory.join(DOCUMENT_FILE_NAME)
    }
}

impl DocumentStore for JsonConnection {
    fn load(&self) -> Result<Option<StoreDocument>> {
        let path = self.document_path();
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read store document {}", path.display()))?;
        let document = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse store document {}", path.display()))?;
        Ok(Some(document))
    }

    fn save(&self, document: &StoreDocument) -> Result<()> {
        let path = self.document_path();
        let raw = serde_json::to_string_pretty(document)?;
        // Atomic write: temp file in the same directory, then rename.
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, raw)
            .with_context(|| format!("failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("failed to replace {}", path.display()))?;
        Ok(())
    }
}
