//! Cross-application reconciliation: the only place plan invariants are enforced.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::answers::Answers;
use super::application::{ApplicationConfig, DiscoveredApp};
use super::deployment::{ServiceDiscovery, ServiceType};
use super::error::AppError;
use super::image::{ImageResolution, normalize_repository};
use super::plan::DeploymentPlan;
use super::secret::Secrets;
use super::store::StoredConfig;
use super::validation::{is_dns_label, is_domain};
use super::warning::AdvisoryWarning;
use crate::ports::{ApplicationCatalog, ConfigStore};

/// Database replicas for a clustered database.
pub const CLUSTERED_DB_PEERS: u8 = 3;

/// Everything the reconciler merges into a plan.
#[derive(Debug, Clone, Copy)]
pub struct PlanInputs<'a> {
    pub answers: &'a Answers,
    pub apps: &'a [DiscoveredApp],
    pub images: &'a ImageResolution,
    pub secrets: &'a Secrets,
}

pub fn derive_cluster_peer_count(app: &ApplicationConfig) -> u8 {
    if app.clustered_db { CLUSTERED_DB_PEERS } else { 1 }
}

pub fn derive_use_kafka(apps: &[ApplicationConfig]) -> bool {
    apps.iter().any(ApplicationConfig::uses_kafka)
}

/// Join each selected folder onto the application root, preserving selection order.
pub fn assemble_folder_paths(
    apps_folders: &[String],
    directory_root: Option<&Path>,
) -> Result<Vec<PathBuf>, AppError> {
    match directory_root {
        Some(root) => Ok(apps_folders.iter().map(|folder| root.join(folder)).collect()),
        None if apps_folders.is_empty() => Ok(Vec::new()),
        None => Err(AppError::PathResolution(format!(
            "{} application folder(s) selected but no root directory is set",
            apps_folders.len()
        ))),
    }
}

/// Merge collected answers, loaded applications, image names and secrets into a plan.
///
/// Fails before anything is written if the result would break an invariant.
pub fn merge_plan(inputs: PlanInputs<'_>) -> Result<DeploymentPlan, AppError> {
    let PlanInputs { answers, apps, images, secrets } = inputs;

    if answers.apps_folders.is_empty() {
        return Err(AppError::validation("No applications selected for deployment"));
    }
    let folder_paths = assemble_folder_paths(
        &answers.apps_folders,
        answers.directory_path.as_deref().map(Path::new),
    )?;

    let loaded: Vec<&str> = apps.iter().map(|app| app.folder.as_str()).collect();
    if loaded != answers.apps_folders {
        return Err(AppError::validation(format!(
            "loaded applications [{}] do not match the selected folders [{}]",
            loaded.join(", "),
            answers.apps_folders.join(", ")
        )));
    }

    let mut configs = Vec::with_capacity(apps.len());
    for (app, path) in apps.iter().zip(folder_paths) {
        let image = images.for_folder(&app.folder).ok_or_else(|| {
            AppError::validation(format!("no image name was resolved for '{}'", app.folder))
        })?;
        let descriptor = &app.descriptor;
        let mut config = ApplicationConfig {
            base_name: descriptor.base_name.clone(),
            app_name: descriptor.base_name.to_lowercase(),
            folder: app.folder.clone(),
            path,
            application_type: descriptor.application_type,
            build_tool: descriptor.build_tool,
            server_port: descriptor.server_port,
            prod_database_type: descriptor.prod_database_type.clone(),
            search_engine: descriptor.search_engine.clone(),
            service_discovery_type: descriptor.service_discovery_type.clone(),
            message_broker: descriptor.message_broker.clone(),
            source_image_name: image.source_image_name.clone(),
            target_image_name: image.target_image_name.clone(),
            clustered_db: answers.clustered_db_apps.contains(&app.folder),
            db_peer_count: 0,
        };
        config.db_peer_count = derive_cluster_peer_count(&config);
        debug!(app = %config.app_name, peers = config.db_peer_count, image = %config.target_image_name, "reconciled application");
        configs.push(config);
    }

    let use_kafka = derive_use_kafka(&configs);
    let plan = DeploymentPlan {
        deployment_type: answers.deployment_type,
        directory_path: answers.directory_path.clone().unwrap_or_default(),
        apps_folders: answers.apps_folders.clone(),
        clustered_db_apps: answers.clustered_db_apps.clone(),
        namespace: answers.namespace.clone(),
        service_type: answers.service_type,
        ingress_domain: answers.ingress_domain.clone(),
        istio: answers.istio,
        istio_route: answers.istio && answers.istio_route,
        service_discovery: answers.service_discovery,
        monitoring: answers.monitoring,
        admin_password: answers.admin_password.clone(),
        jwt_secret: secrets.jwt_secret.clone(),
        db_root_password: secrets.db_root_password.clone(),
        docker_repository_name: normalize_repository(answers.docker_repository_name.as_deref()),
        docker_push_command: images.docker_push_command.clone(),
        use_kafka,
        apps: configs,
    };

    validate_plan(&plan)?;
    info!(apps = plan.apps.len(), namespace = %plan.namespace, use_kafka, "deployment plan reconciled");
    Ok(plan)
}

/// Check every cross-application invariant of a plan.
pub fn validate_plan(plan: &DeploymentPlan) -> Result<(), AppError> {
    if plan.apps.is_empty() {
        return Err(AppError::validation("No applications selected for deployment"));
    }
    if !is_dns_label(&plan.namespace) {
        return Err(AppError::validation(format!(
            "namespace '{}' is not a valid DNS-1123 label",
            plan.namespace
        )));
    }
    if plan.jwt_secret.is_empty() {
        return Err(AppError::validation("JWT secret is empty"));
    }
    if plan.service_discovery == ServiceDiscovery::Eureka
        && plan.admin_password.as_deref().is_none_or(str::is_empty)
    {
        return Err(AppError::validation("the JHipster Registry requires an admin password"));
    }
    if plan.service_type == ServiceType::Ingress || plan.istio {
        match plan.ingress_domain.as_deref() {
            Some(domain) if is_domain(domain) => {}
            Some(domain) => {
                return Err(AppError::validation(format!("ingress domain '{}' is not a valid host name", domain)));
            }
            None => {
                return Err(AppError::validation(
                    "an ingress domain is required for Ingress services or Istio",
                ));
            }
        }
    }

    let prefix = plan.docker_repository_name.as_ref().map(|repository| format!("{}/", repository));
    let mut seen = BTreeSet::new();
    for app in &plan.apps {
        if app.target_image_name.is_empty() {
            return Err(AppError::validation(format!("application '{}' has no target image", app.folder)));
        }
        if let Some(prefix) = &prefix {
            if !app.target_image_name.starts_with(prefix.as_str()) {
                return Err(AppError::validation(format!(
                    "image '{}' of '{}' is not in repository '{}'",
                    app.target_image_name,
                    app.folder,
                    prefix.trim_end_matches('/')
                )));
            }
        }
        if !seen.insert(app.target_image_name.as_str()) {
            return Err(AppError::validation(format!(
                "image name '{}' is used by more than one application",
                app.target_image_name
            )));
        }
        if app.clustered_db && !app.has_clusterable_db() {
            return Err(AppError::validation(format!(
                "application '{}' cannot run a clustered {} database",
                app.folder,
                app.prod_database_type.as_deref().unwrap_or("(none)")
            )));
        }
        if app.db_peer_count != derive_cluster_peer_count(app) {
            return Err(AppError::validation(format!(
                "application '{}' has {} database peer(s), expected {}",
                app.folder,
                app.db_peer_count,
                derive_cluster_peer_count(app)
            )));
        }
    }

    if let Some(folder) =
        plan.clustered_db_apps.iter().find(|folder| !plan.apps_folders.contains(folder))
    {
        return Err(AppError::validation(format!(
            "clustered database application '{}' is not selected",
            folder
        )));
    }
    if plan.use_kafka != derive_use_kafka(&plan.apps) {
        return Err(AppError::validation("Kafka usage does not match the applications' message brokers"));
    }

    Ok(())
}

/// Report every application whose container image has not been built locally.
pub fn check_images<C: ApplicationCatalog + ?Sized>(
    plan: &DeploymentPlan,
    destination: &Path,
    catalog: &C,
) -> Vec<AdvisoryWarning> {
    plan.apps
        .iter()
        .filter_map(|app| {
            let directory = destination.join(&app.path);
            let cache = directory.join(app.build_tool.image_cache_dir());
            if catalog.path_exists(&cache) {
                return None;
            }
            debug!(app = %app.app_name, cache = %cache.display(), "no local image build");
            Some(AdvisoryWarning::MissingImageBuild {
                app: app.app_name.clone(),
                directory,
                command: app.build_tool.image_build_command().to_string(),
            })
        })
        .collect()
}

/// Durable subset of a plan, carrying forward keys this version does not manage.
pub fn durable_subset(plan: &DeploymentPlan, previous: &StoredConfig) -> StoredConfig {
    StoredConfig {
        application_type: Some(plan.deployment_type),
        apps_folders: Some(plan.apps_folders.clone()),
        directory_path: Some(plan.directory_path.clone()),
        clustered_db_apps: Some(plan.clustered_db_apps.clone()),
        service_discovery_type: Some(plan.service_discovery),
        jwt_secret_key: Some(plan.jwt_secret.clone()),
        docker_repository_name: plan.docker_repository_name.clone(),
        docker_push_command: Some(plan.docker_push_command.clone()),
        kubernetes_namespace: Some(plan.namespace.clone()),
        kubernetes_service_type: Some(plan.service_type),
        ingress_domain: plan.ingress_domain.clone(),
        monitoring: Some(plan.monitoring),
        istio: Some(plan.istio),
        istio_route: Some(plan.istio_route),
        extra: previous.extra.clone(),
    }
}

/// Persist the plan's durable subset in a single write.
pub fn commit<S: ConfigStore + ?Sized>(
    store: &S,
    plan: &DeploymentPlan,
    previous: &StoredConfig,
) -> Result<StoredConfig, AppError> {
    let record = durable_subset(plan, previous);
    store.save(&record)?;
    info!("deployment configuration saved");
    Ok(record)
}
