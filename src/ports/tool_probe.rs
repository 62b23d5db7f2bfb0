use crate::domain::AdvisoryWarning;

/// Port for checking the locally installed orchestration client.
pub trait ToolProbe {
    /// `None` when the client is usable, otherwise the warning to report.
    fn check_installed(&self) -> Option<AdvisoryWarning>;
}
