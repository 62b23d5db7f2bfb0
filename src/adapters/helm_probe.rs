//! Check for a local Helm client.

use std::process::Command;

use tracing::debug;

use crate::domain::AdvisoryWarning;
use crate::ports::ToolProbe;

const HELM: &str = "helm";

/// Runs `helm version` and reports a warning when it does not succeed.
#[derive(Debug, Clone)]
pub struct HelmProbe {
    program: String,
}

impl HelmProbe {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl Default for HelmProbe {
    fn default() -> Self {
        Self::new(HELM)
    }
}

impl ToolProbe for HelmProbe {
    fn check_installed(&self) -> Option<AdvisoryWarning> {
        let missing = |detail: String| AdvisoryWarning::ToolMissing { tool: HELM.to_string(), detail };
        match Command::new(&self.program).args(["version", "--short"]).output() {
            Err(err) => Some(missing(err.to_string())),
            Ok(output) if !output.status.success() => {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                Some(missing(if stderr.is_empty() { output.status.to_string() } else { stderr }))
            }
            Ok(output) => {
                debug!(version = %String::from_utf8_lossy(&output.stdout).trim(), "helm client found");
                None
            }
        }
    }
}
