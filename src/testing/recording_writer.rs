//! Test double for `DescriptorWriter`.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::domain::{AppError, DeploymentPlan};
use crate::ports::DescriptorWriter;

/// Records written plans and chmod calls instead of touching the filesystem.
#[derive(Clone, Debug, Default)]
pub struct RecordingWriter {
    written: Arc<Mutex<Vec<DeploymentPlan>>>,
    executables: Arc<Mutex<Vec<String>>>,
    fail_chmod: bool,
    fail_write: bool,
}

impl RecordingWriter {
    pub fn failing_chmod() -> Self {
        Self { fail_chmod: true, ..Self::default() }
    }

    pub fn failing_write() -> Self {
        Self { fail_write: true, ..Self::default() }
    }

    pub fn written(&self) -> Vec<DeploymentPlan> {
        self.written.lock().unwrap().clone()
    }

    pub fn executables(&self) -> Vec<String> {
        self.executables.lock().unwrap().clone()
    }
}

impl DescriptorWriter for RecordingWriter {
    fn write(&self, plan: &DeploymentPlan) -> Result<Vec<PathBuf>, AppError> {
        if self.fail_write {
            return Err(AppError::from(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "Mock output directory is read-only",
            )));
        }
        self.written.lock().unwrap().push(plan.clone());
        Ok(plan.apps().iter().map(|app| PathBuf::from(format!("{}-helm/Chart.yaml", app.app_name))).collect())
    }

    fn make_executable(&self, script: &str) -> Result<(), AppError> {
        if self.fail_chmod {
            return Err(AppError::from(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "Mock chmod refused",
            )));
        }
        self.executables.lock().unwrap().push(script.to_string());
        Ok(())
    }
}
