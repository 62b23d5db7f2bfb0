//! Durable record of prior deployment decisions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::deployment::{DeploymentType, Monitoring, ServiceDiscovery, ServiceType};

/// File holding the stored configuration inside the output directory.
pub const STORE_FILE: &str = ".deploy-rc.json";

/// Flat key/value record persisted between runs.
///
/// Known keys are overwritten wholesale on every successful run; keys this
/// version does not know about are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_type: Option<DeploymentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apps_folders: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clustered_db_apps: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_discovery_type: Option<ServiceDiscovery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwt_secret_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_repository_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_push_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_service_type: Option<ServiceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitoring: Option<Monitoring>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub istio: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub istio_route: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl StoredConfig {
    /// Stored JWT secret, ignoring an empty value.
    pub fn jwt_secret(&self) -> Option<&str> {
        self.jwt_secret_key.as_deref().filter(|secret| !secret.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let json = r#"{
            "kubernetesNamespace": "shop",
            "kubernetesServiceType": "Ingress",
            "serviceDiscoveryType": false,
            "promptValues": {"packageName": "com.shop"}
        }"#;

        let stored: StoredConfig = serde_json::from_str(json).unwrap();
        assert_eq!(stored.kubernetes_namespace.as_deref(), Some("shop"));
        assert_eq!(stored.kubernetes_service_type, Some(ServiceType::Ingress));
        assert_eq!(stored.service_discovery_type, Some(ServiceDiscovery::No));
        assert!(stored.extra.contains_key("promptValues"));

        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(value["promptValues"]["packageName"], "com.shop");
        assert!(value.get("istio").is_none());
    }

    #[test]
    fn empty_jwt_secret_counts_as_absent() {
        let stored = StoredConfig { jwt_secret_key: Some(String::new()), ..Default::default() };
        assert_eq!(stored.jwt_secret(), None);
    }
}
