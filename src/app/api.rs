//! API Facade for the application.
//!
//! Builds the filesystem-backed context and runs commands against it.

use std::path::{Path, PathBuf};

use crate::adapters::{
    DialoguerPrompter, FilesystemCatalog, HelmChartWriter, HelmProbe, JsonConfigStore, PresetPrompter,
};
use crate::app::AppContext;
use crate::app::commands::{generate, show};
use crate::ports::Prompter;

pub use crate::app::commands::generate::{GenerateOptions, GenerateOutcome};
pub use crate::domain::{AppError, StoredConfig};

/// Inputs of one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Output directory for the charts, scripts and stored configuration.
    pub dir: PathBuf,
    /// Declarative answers file; prompts interactively when absent.
    pub answers: Option<PathBuf>,
    pub skip_checks: bool,
    pub dry_run: bool,
}

fn create_context(
    dir: &Path,
) -> Result<AppContext<JsonConfigStore, FilesystemCatalog, HelmChartWriter>, AppError> {
    Ok(AppContext::new(
        dir,
        JsonConfigStore::in_dir(dir),
        FilesystemCatalog::new(),
        HelmChartWriter::new(dir)?,
    ))
}

/// Collect answers, reconcile them and write the Helm charts.
pub fn generate(request: &GenerateRequest) -> Result<GenerateOutcome, AppError> {
    let ctx = create_context(&request.dir)?;
    let mut prompter: Box<dyn Prompter> = match &request.answers {
        Some(path) => Box::new(PresetPrompter::from_path(path)?),
        None => Box::new(DialoguerPrompter::new()),
    };
    let options = GenerateOptions { skip_checks: request.skip_checks, dry_run: request.dry_run };

    generate::execute(&ctx, prompter.as_mut(), &HelmProbe::default(), &mut rand::thread_rng(), options)
}

/// Stored configuration of the output directory `dir`, if any.
pub fn show(dir: &Path) -> Result<Option<StoredConfig>, AppError> {
    show::execute(&JsonConfigStore::in_dir(dir))
}
