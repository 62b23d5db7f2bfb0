//! The reconciled, write-once deployment plan.

use serde::Serialize;

use super::answers::Answers;
use super::application::{ApplicationConfig, DiscoveredApp};
use super::deployment::{DeploymentType, Monitoring, ServiceDiscovery, ServiceType};
use super::error::AppError;
use super::image::ImageResolution;
use super::reconcile::{PlanInputs, merge_plan};
use super::secret::Secrets;

/// Fully reconciled configuration for one generation run.
///
/// Only [`DeploymentPlanBuilder`] creates plans, and it only returns one that
/// satisfies every cross-application invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentPlan {
    pub(crate) deployment_type: DeploymentType,
    pub(crate) directory_path: String,
    pub(crate) apps_folders: Vec<String>,
    pub(crate) clustered_db_apps: Vec<String>,
    pub(crate) namespace: String,
    pub(crate) service_type: ServiceType,
    pub(crate) ingress_domain: Option<String>,
    pub(crate) istio: bool,
    pub(crate) istio_route: bool,
    pub(crate) service_discovery: ServiceDiscovery,
    pub(crate) monitoring: Monitoring,
    pub(crate) admin_password: Option<String>,
    pub(crate) jwt_secret: String,
    pub(crate) db_root_password: String,
    pub(crate) docker_repository_name: Option<String>,
    pub(crate) docker_push_command: String,
    pub(crate) use_kafka: bool,
    pub(crate) apps: Vec<ApplicationConfig>,
}

impl DeploymentPlan {
    pub fn builder() -> DeploymentPlanBuilder {
        DeploymentPlanBuilder::default()
    }

    pub fn deployment_type(&self) -> DeploymentType {
        self.deployment_type
    }

    pub fn directory_path(&self) -> &str {
        &self.directory_path
    }

    pub fn apps_folders(&self) -> &[String] {
        &self.apps_folders
    }

    pub fn clustered_db_apps(&self) -> &[String] {
        &self.clustered_db_apps
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    pub fn ingress_domain(&self) -> Option<&str> {
        self.ingress_domain.as_deref()
    }

    pub fn istio(&self) -> bool {
        self.istio
    }

    pub fn istio_route(&self) -> bool {
        self.istio_route
    }

    pub fn service_discovery(&self) -> ServiceDiscovery {
        self.service_discovery
    }

    pub fn monitoring(&self) -> Monitoring {
        self.monitoring
    }

    pub fn admin_password(&self) -> Option<&str> {
        self.admin_password.as_deref()
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn db_root_password(&self) -> &str {
        &self.db_root_password
    }

    pub fn docker_repository_name(&self) -> Option<&str> {
        self.docker_repository_name.as_deref()
    }

    pub fn docker_push_command(&self) -> &str {
        &self.docker_push_command
    }

    pub fn use_kafka(&self) -> bool {
        self.use_kafka
    }

    /// Applications in discovery order.
    pub fn apps(&self) -> &[ApplicationConfig] {
        &self.apps
    }
}

/// Collects the outputs of the earlier stages and hands them to the reconciler.
#[derive(Debug, Default)]
pub struct DeploymentPlanBuilder {
    answers: Option<Answers>,
    apps: Vec<DiscoveredApp>,
    images: Option<ImageResolution>,
    secrets: Option<Secrets>,
}

impl DeploymentPlanBuilder {
    pub fn answers(mut self, answers: Answers) -> Self {
        self.answers = Some(answers);
        self
    }

    pub fn applications(mut self, apps: Vec<DiscoveredApp>) -> Self {
        self.apps = apps;
        self
    }

    pub fn images(mut self, images: ImageResolution) -> Self {
        self.images = Some(images);
        self
    }

    pub fn secrets(mut self, secrets: Secrets) -> Self {
        self.secrets = Some(secrets);
        self
    }

    /// Reconcile everything collected so far into a validated plan.
    pub fn build(self) -> Result<DeploymentPlan, AppError> {
        let answers = self.answers.ok_or_else(|| missing("deployment answers"))?;
        let images = self.images.ok_or_else(|| missing("resolved image names"))?;
        let secrets = self.secrets.ok_or_else(|| missing("deployment secrets"))?;

        merge_plan(PlanInputs { answers: &answers, apps: &self.apps, images: &images, secrets: &secrets })
    }
}

fn missing(what: &str) -> AppError {
    AppError::validation(format!("plan is missing {}", what))
}
