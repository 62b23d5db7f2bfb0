//! Per-application build metadata and the reconciled application entry of a plan.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

/// Build descriptor file each deployable application carries at its root.
pub const APP_DESCRIPTOR_FILE: &str = ".yo-rc.json";

/// Section of the build descriptor holding the application's generation settings.
pub const APP_DESCRIPTOR_SECTION: &str = "generator-jhipster";

/// Databases the generated charts can run as a replicated cluster.
const CLUSTERABLE_DATABASES: [&str; 1] = ["mongodb"];

const DEFAULT_SERVER_PORT: u16 = 8080;

/// Role an application plays in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationType {
    #[default]
    Monolith,
    Gateway,
    Microservice,
    Uaa,
}

impl ApplicationType {
    /// Whether the application receives external traffic.
    pub fn is_edge(self) -> bool {
        matches!(self, ApplicationType::Monolith | ApplicationType::Gateway)
    }
}

/// Build tool an application was generated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildTool {
    #[default]
    Maven,
    Gradle,
}

impl BuildTool {
    /// Directory (relative to the application folder) that holds the local image build cache.
    pub fn image_cache_dir(self) -> &'static str {
        match self {
            BuildTool::Maven => "target/jib-cache",
            BuildTool::Gradle => "build/jib-cache",
        }
    }

    /// Command that builds the application's container image locally.
    pub fn image_build_command(self) -> &'static str {
        match self {
            BuildTool::Maven => "./mvnw -ntp -Pprod verify jib:dockerBuild",
            BuildTool::Gradle => "./gradlew bootJar -Pprod jibDockerBuild",
        }
    }
}

/// Generation settings read from an application's build descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDescriptor {
    #[serde(default)]
    pub base_name: String,
    #[serde(default)]
    pub application_type: ApplicationType,
    #[serde(default)]
    pub build_tool: BuildTool,
    #[serde(default = "default_server_port", deserialize_with = "port")]
    pub server_port: u16,
    #[serde(default, deserialize_with = "optional_name")]
    pub prod_database_type: Option<String>,
    #[serde(default, deserialize_with = "optional_name")]
    pub message_broker: Option<String>,
    #[serde(default, deserialize_with = "optional_name")]
    pub service_discovery_type: Option<String>,
    #[serde(default, deserialize_with = "optional_name")]
    pub search_engine: Option<String>,
}

impl AppDescriptor {
    /// Whether the production database supports a clustered deployment.
    pub fn has_clusterable_db(&self) -> bool {
        is_clusterable(self.prod_database_type.as_deref())
    }

    pub fn service_discovery(&self) -> Option<&str> {
        self.service_discovery_type.as_deref()
    }
}

pub fn is_clusterable(database: Option<&str>) -> bool {
    database.is_some_and(|db| CLUSTERABLE_DATABASES.contains(&db))
}

fn default_server_port() -> u16 {
    DEFAULT_SERVER_PORT
}

/// Descriptors record disabled features as `false` and enabled ones by name.
fn optional_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(name) if !name.is_empty() && name != "no" => {
            Some(name.to_lowercase())
        }
        _ => None,
    })
}

/// Ports appear both as numbers and as strings.
fn port<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(number) => number
            .as_u64()
            .and_then(|n| u16::try_from(n).ok())
            .ok_or_else(|| D::Error::custom(format!("invalid server port {}", number))),
        serde_json::Value::String(text) => {
            text.trim().parse().map_err(|_| D::Error::custom(format!("invalid server port '{}'", text)))
        }
        serde_json::Value::Null => Ok(DEFAULT_SERVER_PORT),
        other => Err(D::Error::custom(format!("invalid server port {}", other))),
    }
}

/// A selected application folder together with its loaded build descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredApp {
    pub folder: String,
    pub path: PathBuf,
    pub descriptor: AppDescriptor,
}

/// One application's entry in the reconciled deployment plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationConfig {
    pub base_name: String,
    /// Lowercased base name, used for chart and Kubernetes object names.
    pub app_name: String,
    pub folder: String,
    pub path: PathBuf,
    pub application_type: ApplicationType,
    pub build_tool: BuildTool,
    pub server_port: u16,
    pub prod_database_type: Option<String>,
    pub search_engine: Option<String>,
    pub service_discovery_type: Option<String>,
    pub message_broker: Option<String>,
    pub source_image_name: String,
    pub target_image_name: String,
    pub clustered_db: bool,
    pub db_peer_count: u8,
}

impl ApplicationConfig {
    pub fn uses_kafka(&self) -> bool {
        self.message_broker.as_deref() == Some("kafka")
    }

    pub fn has_clusterable_db(&self) -> bool {
        is_clusterable(self.prod_database_type.as_deref())
    }

    pub fn needs_retag(&self) -> bool {
        self.source_image_name != self.target_image_name
    }
}
