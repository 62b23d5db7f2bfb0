use serde::Serialize;

use super::deployment::{DeploymentType, Monitoring, ServiceDiscovery, ServiceType};

/// Deployment-wide answers gathered by the collector.
///
/// Every field has a default so a step that is skipped leaves a well-defined
/// value behind rather than a stale one from a previous run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answers {
    pub deployment_type: DeploymentType,
    pub directory_path: Option<String>,
    pub apps_folders: Vec<String>,
    pub monitoring: Monitoring,
    pub clustered_db_apps: Vec<String>,
    pub service_discovery: ServiceDiscovery,
    pub admin_password: Option<String>,
    pub namespace: String,
    pub docker_repository_name: Option<String>,
    pub docker_push_command: String,
    pub istio: bool,
    pub istio_route: bool,
    pub service_type: ServiceType,
    pub ingress_domain: Option<String>,
}

pub const DEFAULT_DIRECTORY_PATH: &str = "../";
pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";
pub const DEFAULT_INGRESS_DOMAIN: &str = "192.168.99.100.nip.io";

impl Default for Answers {
    fn default() -> Self {
        Self {
            deployment_type: DeploymentType::default(),
            directory_path: None,
            apps_folders: Vec::new(),
            monitoring: Monitoring::default(),
            clustered_db_apps: Vec::new(),
            service_discovery: ServiceDiscovery::default(),
            admin_password: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            docker_repository_name: None,
            docker_push_command: super::image::DEFAULT_PUSH_COMMAND.to_string(),
            istio: false,
            istio_route: false,
            service_type: ServiceType::default(),
            ingress_domain: None,
        }
    }
}
