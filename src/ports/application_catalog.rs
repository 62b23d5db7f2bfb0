use std::path::Path;

use crate::domain::{AppDescriptor, AppError};

/// Port for discovering deployable applications and reading their build metadata.
pub trait ApplicationCatalog {
    /// Folder names under `root` that contain an application, in a stable sorted order.
    fn list_applications(&self, root: &Path) -> Result<Vec<String>, AppError>;

    /// Load the build descriptor of the application at `folder`.
    ///
    /// Fails with [`AppError::Configuration`] naming `folder` when it holds no usable descriptor.
    fn load_descriptor(&self, folder: &Path) -> Result<AppDescriptor, AppError>;

    /// Whether `path` exists; used to look for local image builds.
    fn path_exists(&self, path: &Path) -> bool;
}
