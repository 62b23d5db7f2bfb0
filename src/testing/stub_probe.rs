use crate::domain::AdvisoryWarning;
use crate::ports::ToolProbe;

/// Tool probe with a fixed outcome.
#[derive(Clone, Debug, Default)]
pub struct StubProbe {
    warning: Option<AdvisoryWarning>,
}

impl StubProbe {
    pub fn installed() -> Self {
        Self::default()
    }

    pub fn missing() -> Self {
        Self {
            warning: Some(AdvisoryWarning::ToolMissing {
                tool: "helm".to_string(),
                detail: "command not found".to_string(),
            }),
        }
    }
}

impl ToolProbe for StubProbe {
    fn check_installed(&self) -> Option<AdvisoryWarning> {
        self.warning.clone()
    }
}
