use std::path::{Path, PathBuf};

use crate::ports::{ApplicationCatalog, ConfigStore, DescriptorWriter};

/// Application context holding dependencies for command execution.
pub struct AppContext<S: ConfigStore, C: ApplicationCatalog, W: DescriptorWriter> {
    destination: PathBuf,
    store: S,
    catalog: C,
    writer: W,
}

impl<S: ConfigStore, C: ApplicationCatalog, W: DescriptorWriter> AppContext<S, C, W> {
    /// Create a new application context writing into `destination`.
    pub fn new(destination: impl Into<PathBuf>, store: S, catalog: C, writer: W) -> Self {
        Self { destination: destination.into(), store, catalog, writer }
    }

    /// Output directory; application paths are resolved against it.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}
