use std::fmt;
use std::path::PathBuf;

/// Non-fatal condition recorded during a run and reported once at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisoryWarning {
    /// The local orchestration client is missing or could not report its version.
    ToolMissing { tool: String, detail: String },
    /// No local image build was found for an application.
    MissingImageBuild { app: String, directory: PathBuf, command: String },
    /// Generated scripts could not be made executable.
    ScriptPermissions { scripts: Vec<String>, detail: String },
}

impl AdvisoryWarning {
    pub fn is_missing_image(&self) -> bool {
        matches!(self, AdvisoryWarning::MissingImageBuild { .. })
    }
}

impl fmt::Display for AdvisoryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisoryWarning::ToolMissing { tool, detail } => write!(
                f,
                "{tool} 3 or later is not installed on your computer ({detail}). \
                 Make sure you have {tool} installed. Read https://github.com/helm/helm/"
            ),
            AdvisoryWarning::MissingImageBuild { app, directory, command } => {
                write!(f, "{command} in {} (no image build found for {app})", directory.display())
            }
            AdvisoryWarning::ScriptPermissions { scripts, detail } => write!(
                f,
                "Failed to make {} executable ({detail}), you may need to run 'chmod +x {}'",
                scripts.iter().map(|s| format!("'{s}'")).collect::<Vec<_>>().join(", "),
                scripts.join(" ")
            ),
        }
    }
}
