//! Deployment intent collection.
//!
//! The collector walks a fixed list of [`Step`]s. Each step looks at what has
//! been collected so far to decide whether it applies, then asks its question
//! through the [`Prompter`] port. Defaults come from the stored configuration,
//! so identical stored state and identical input always produce identical
//! answers.

mod question;
mod steps;

use std::path::Path;

use tracing::debug;

pub use question::{Answer, Choice, Question, QuestionKind};
pub use steps::{STEPS, Step};

use super::answers::Answers;
use super::application::DiscoveredApp;
use super::error::AppError;
use super::store::StoredConfig;
use crate::ports::{ApplicationCatalog, Prompter};

/// Read-only inputs available to every step.
pub struct CollectContext<'a> {
    /// Output directory; relative application paths are resolved against it.
    pub destination: &'a Path,
    pub catalog: &'a dyn ApplicationCatalog,
    pub stored: &'a StoredConfig,
}

/// Answers and selected applications gathered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    pub answers: Answers,
    pub apps: Vec<DiscoveredApp>,
}

/// Run every applicable step in order.
pub fn collect(prompter: &mut dyn Prompter, ctx: &CollectContext<'_>) -> Result<Collection, AppError> {
    let mut collection = Collection::default();
    for step in STEPS {
        if !(step.applies)(&collection) {
            debug!(step = step.name, "step skipped");
            continue;
        }
        debug!(step = step.name, produces = ?step.produces, "asking");
        (step.ask)(prompter, ctx, &mut collection)?;
    }
    Ok(collection)
}
