//! Test double for `ApplicationCatalog`.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::domain::{AppDescriptor, AppError};
use crate::ports::ApplicationCatalog;

/// Applications living directly under a single root directory.
#[derive(Clone, Debug)]
pub struct MemoryCatalog {
    root: PathBuf,
    apps: BTreeMap<String, Option<AppDescriptor>>,
    existing: BTreeSet<PathBuf>,
}

impl MemoryCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), apps: BTreeMap::new(), existing: BTreeSet::new() }
    }

    pub fn with_app(mut self, folder: &str, descriptor: AppDescriptor) -> Self {
        self.apps.insert(folder.to_string(), Some(descriptor));
        self
    }

    /// A folder that is listed but whose descriptor cannot be loaded.
    pub fn with_broken_app(mut self, folder: &str) -> Self {
        self.apps.insert(folder.to_string(), None);
        self
    }

    /// Mark a local image build directory as present.
    pub fn with_image_cache(mut self, path: impl Into<PathBuf>) -> Self {
        self.existing.insert(path.into());
        self
    }
}

impl ApplicationCatalog for MemoryCatalog {
    fn list_applications(&self, root: &Path) -> Result<Vec<String>, AppError> {
        if root != self.root {
            return Err(AppError::from(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Mock directory not found",
            )));
        }
        Ok(self.apps.keys().cloned().collect())
    }

    fn load_descriptor(&self, folder: &Path) -> Result<AppDescriptor, AppError> {
        let entry = self.apps.iter().find(|(name, _)| self.root.join(name) == folder);
        match entry {
            Some((_, Some(descriptor))) => Ok(descriptor.clone()),
            _ => Err(AppError::configuration(folder, "no application descriptor found")),
        }
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.existing.iter().any(|existing| existing == path)
    }
}
