//! helmgen: reconcile multi-application deployment intent into Helm charts for Kubernetes.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    GenerateOptions, GenerateOutcome, GenerateRequest, StoredConfig, generate, show,
};
pub use domain::{AppError, CompletionReport, DeploymentPlan};
