//! Application discovery on the local filesystem.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::{APP_DESCRIPTOR_FILE, APP_DESCRIPTOR_SECTION, AppDescriptor, AppError};
use crate::ports::ApplicationCatalog;

/// Finds applications by their `.yo-rc.json` build descriptor.
#[derive(Debug, Clone, Default)]
pub struct FilesystemCatalog;

impl FilesystemCatalog {
    pub fn new() -> Self {
        Self
    }
}

impl ApplicationCatalog for FilesystemCatalog {
    fn list_applications(&self, root: &Path) -> Result<Vec<String>, AppError> {
        let mut folders = Vec::new();
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if has_descriptor(&entry.path()) {
                folders.push(name);
            } else {
                debug!(folder = %name, "skipping folder without an application descriptor");
            }
        }
        folders.sort();
        Ok(folders)
    }

    fn load_descriptor(&self, folder: &Path) -> Result<AppDescriptor, AppError> {
        read_descriptor(folder)
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// A descriptor file that is not plain JSON still marks an application, so a
/// broken one fails on load instead of dropping out of the listing.
fn has_descriptor(folder: &Path) -> bool {
    let Ok(content) = fs::read_to_string(folder.join(APP_DESCRIPTOR_FILE)) else {
        return false;
    };
    match serde_json::from_str::<serde_json::Value>(&content) {
        Ok(document) => document.get(APP_DESCRIPTOR_SECTION).is_some(),
        Err(_) => true,
    }
}

fn read_descriptor(folder: &Path) -> Result<AppDescriptor, AppError> {
    let file = folder.join(APP_DESCRIPTOR_FILE);
    let content = fs::read_to_string(&file).map_err(|e| {
        AppError::configuration(folder, format!("cannot read {}: {}", APP_DESCRIPTOR_FILE, e))
    })?;
    let mut document: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
        AppError::configuration(folder, format!("{} is not valid JSON: {}", APP_DESCRIPTOR_FILE, e))
    })?;
    let section = document.get_mut(APP_DESCRIPTOR_SECTION).map(serde_json::Value::take).ok_or_else(|| {
        AppError::configuration(
            folder,
            format!("{} has no '{}' section", APP_DESCRIPTOR_FILE, APP_DESCRIPTOR_SECTION),
        )
    })?;
    serde_json::from_value(section).map_err(|e| AppError::configuration(folder, e.to_string()))
}
