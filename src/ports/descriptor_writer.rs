use std::path::PathBuf;

use crate::domain::{AppError, DeploymentPlan};

/// Port for rendering a finalized plan into deployment descriptors.
pub trait DescriptorWriter {
    /// Render every chart and script for `plan`; returns the written paths relative to the output directory.
    fn write(&self, plan: &DeploymentPlan) -> Result<Vec<PathBuf>, AppError>;

    /// Mark a generated script executable (mode 755).
    fn make_executable(&self, script: &str) -> Result<(), AppError>;
}
