//! Test double for `ConfigStore`.

use std::sync::{Arc, Mutex};

use crate::domain::{AppError, StoredConfig};
use crate::ports::ConfigStore;

/// Stored configuration kept in memory, counting every save.
#[derive(Clone, Debug, Default)]
pub struct MemoryConfigStore {
    stored: Arc<Mutex<Option<StoredConfig>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryConfigStore {
    /// A store that already holds `config`, as if written by an earlier run.
    pub fn with_stored(config: StoredConfig) -> Self {
        Self { stored: Arc::new(Mutex::new(Some(config))), saves: Arc::default() }
    }

    pub fn saved(&self) -> Option<StoredConfig> {
        self.stored.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<StoredConfig, AppError> {
        Ok(self.stored.lock().unwrap().clone().unwrap_or_default())
    }

    fn save(&self, config: &StoredConfig) -> Result<(), AppError> {
        *self.stored.lock().unwrap() = Some(config.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}
