//! `.deploy-rc.json` persistence for the stored configuration.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{AppError, STORE_FILE, StoredConfig};
use crate::ports::ConfigStore;

/// Stored configuration kept as pretty-printed JSON in the output directory.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store file inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonConfigStore {
    fn load(&self) -> Result<StoredConfig, AppError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no stored configuration");
            return Ok(StoredConfig::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(StoredConfig::default());
        }
        serde_json::from_str(&content).map_err(|e| AppError::parse(self.path.display().to_string(), e))
    }

    fn save(&self, config: &StoredConfig) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut content = serde_json::to_string_pretty(config)
            .map_err(|e| AppError::serialize("stored configuration", e))?;
        content.push('\n');

        // Readers never observe a half-written store.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, content)?;
        fs::rename(&staging, &self.path)?;
        debug!(path = %self.path.display(), "stored configuration saved");
        Ok(())
    }
}
