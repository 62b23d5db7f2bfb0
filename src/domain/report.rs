//! End-of-run report: push instructions, accumulated warnings and script permissions.

use std::fmt;

use tracing::debug;

use super::plan::DeploymentPlan;
use super::warning::AdvisoryWarning;
use crate::ports::DescriptorWriter;

pub const APPLY_SCRIPT: &str = "helm-apply.sh";
pub const UPGRADE_SCRIPT: &str = "helm-upgrade.sh";

/// Generated entry points, in the order they are reported.
pub const SCRIPTS: [&str; 2] = [APPLY_SCRIPT, UPGRADE_SCRIPT];

/// Commands that publish one application's image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushInstruction {
    pub app: String,
    /// `docker image tag` command, present when the target image differs from the local one.
    pub retag: Option<String>,
    pub push: String,
}

/// Push instructions in application discovery order.
pub fn push_instructions(plan: &DeploymentPlan) -> Vec<PushInstruction> {
    plan.apps()
        .iter()
        .map(|app| PushInstruction {
            app: app.app_name.clone(),
            retag: app.needs_retag().then(|| {
                format!("docker image tag {} {}", app.source_image_name, app.target_image_name)
            }),
            push: format!("{} {}", plan.docker_push_command(), app.target_image_name),
        })
        .collect()
}

/// Make the generated scripts executable, turning any failure into a warning.
pub fn mark_scripts_executable<W: DescriptorWriter + ?Sized>(writer: &W) -> Option<AdvisoryWarning> {
    let failures: Vec<String> = SCRIPTS
        .iter()
        .filter_map(|script| writer.make_executable(script).err().map(|err| format!("{script}: {err}")))
        .collect();
    if failures.is_empty() {
        return None;
    }

    let warning = AdvisoryWarning::ScriptPermissions {
        scripts: SCRIPTS.iter().map(|script| script.to_string()).collect(),
        detail: failures.join("; "),
    };
    debug!(%warning, "scripts left non-executable");
    Some(warning)
}

/// Everything printed once the run has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    pub warnings: Vec<AdvisoryWarning>,
    pub instructions: Vec<PushInstruction>,
}

impl CompletionReport {
    pub fn new(plan: &DeploymentPlan, warnings: Vec<AdvisoryWarning>) -> Self {
        Self { warnings, instructions: push_instructions(plan) }
    }

    /// False when some application is missing its local image build.
    pub fn is_success(&self) -> bool {
        !self.warnings.iter().any(AdvisoryWarning::is_missing_image)
    }
}

impl fmt::Display for CompletionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            writeln!(f, "✅ Helm configuration successfully generated!")?;
        } else {
            writeln!(f, "⚠️  Helm configuration generated, but no Jib cache found")?;
            writeln!(f, "If you forgot to generate the Docker image for this application, please run:")?;
            for warning in self.warnings.iter().filter(|w| w.is_missing_image()) {
                writeln!(f, "  {}", warning)?;
            }
        }
        for warning in self.warnings.iter().filter(|w| !w.is_missing_image()) {
            writeln!(f, "⚠️  {}", warning)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "⚠️  You will need to push your image to a registry. If you have not done so, \
             use the following commands to tag and push the images:"
        )?;
        for instruction in &self.instructions {
            if let Some(retag) = &instruction.retag {
                writeln!(f, "  {}", retag)?;
            }
            writeln!(f, "  {}", instruction.push)?;
        }

        writeln!(f)?;
        writeln!(f, "You can deploy all your apps by running the following script:")?;
        writeln!(f, "  bash {}", APPLY_SCRIPT)?;
        writeln!(f)?;
        writeln!(f, "You can upgrade (after any changes) all your apps by running the following script:")?;
        write!(f, "  bash {}", UPGRADE_SCRIPT)
    }
}
