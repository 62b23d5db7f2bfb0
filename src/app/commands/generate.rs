//! The generation run: probe, collect, resolve, reconcile, commit, write, report.

use std::path::PathBuf;

use rand::Rng;
use tracing::{debug, info};

use crate::app::AppContext;
use crate::domain::collector::{CollectContext, collect};
use crate::domain::reconcile::{check_images, commit};
use crate::domain::report::mark_scripts_executable;
use crate::domain::{AppError, CompletionReport, DeploymentPlan, generate_secrets, resolve_images};
use crate::ports::{ApplicationCatalog, ConfigStore, DescriptorWriter, Prompter, ToolProbe};

#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Do not look for a local Helm client.
    pub skip_checks: bool,
    /// Stop after reconciliation: nothing is stored or written.
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct GenerateOutcome {
    pub plan: DeploymentPlan,
    pub report: CompletionReport,
    /// Written paths relative to the output directory; empty on a dry run.
    pub written: Vec<PathBuf>,
    pub committed: bool,
}

/// Execute one generation run.
///
/// Nothing is stored or written unless every answer was collected and the
/// reconciled plan is valid.
pub fn execute<S, C, W, R>(
    ctx: &AppContext<S, C, W>,
    prompter: &mut dyn Prompter,
    probe: &dyn ToolProbe,
    rng: &mut R,
    options: GenerateOptions,
) -> Result<GenerateOutcome, AppError>
where
    S: ConfigStore,
    C: ApplicationCatalog,
    W: DescriptorWriter,
    R: Rng + ?Sized,
{
    let mut warnings = Vec::new();
    if options.skip_checks {
        debug!("tool checks skipped");
    } else if let Some(warning) = probe.check_installed() {
        debug!(%warning, "helm client check failed");
        warnings.push(warning);
    }

    let stored = ctx.store().load()?;
    let collect_ctx =
        CollectContext { destination: ctx.destination(), catalog: ctx.catalog(), stored: &stored };
    let collection = collect(prompter, &collect_ctx)?;
    info!(apps = collection.apps.len(), "answers collected");

    let answers = collection.answers;
    let images = resolve_images(
        &collection.apps,
        answers.docker_repository_name.as_deref(),
        Some(answers.docker_push_command.as_str()),
    )?;
    let secrets = generate_secrets(stored.jwt_secret(), rng);
    if secrets.jwt_generated {
        info!("generated a new JWT secret");
    }

    let plan = DeploymentPlan::builder()
        .answers(answers)
        .applications(collection.apps)
        .images(images)
        .secrets(secrets)
        .build()?;

    for warning in check_images(&plan, ctx.destination(), ctx.catalog()) {
        debug!(%warning, "image build missing");
        warnings.push(warning);
    }

    if options.dry_run {
        info!("dry run: nothing stored or written");
        let report = CompletionReport::new(&plan, warnings);
        return Ok(GenerateOutcome { plan, report, written: Vec::new(), committed: false });
    }

    commit(ctx.store(), &plan, &stored)?;
    info!("configuration stored");

    let written = ctx.writer().write(&plan)?;
    info!(files = written.len(), "charts written");
    warnings.extend(mark_scripts_executable(ctx.writer()));

    let report = CompletionReport::new(&plan, warnings);
    Ok(GenerateOutcome { plan, report, written, committed: true })
}
