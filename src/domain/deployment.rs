//! Deployment-wide option vocabularies shared by the collector, the plan and the store.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

/// Shape of the system being deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentType {
    #[default]
    Microservice,
    Monolith,
}

impl DeploymentType {
    pub const ALL: [DeploymentType; 2] = [DeploymentType::Microservice, DeploymentType::Monolith];

    pub fn as_str(self) -> &'static str {
        match self {
            DeploymentType::Microservice => "microservice",
            DeploymentType::Monolith => "monolith",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeploymentType::Microservice => "Microservice application",
            DeploymentType::Monolith => "Monolithic application",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

/// Monitoring stack wired into the generated charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Monitoring {
    #[default]
    No,
    Prometheus,
}

impl Monitoring {
    pub const ALL: [Monitoring; 2] = [Monitoring::No, Monitoring::Prometheus];

    pub fn as_str(self) -> &'static str {
        match self {
            Monitoring::No => "no",
            Monitoring::Prometheus => "prometheus",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Monitoring::No => "No",
            Monitoring::Prometheus => "Yes, for metrics only with Prometheus",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == value)
    }
}

/// Service-discovery backend shared by every application in the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceDiscovery {
    #[default]
    No,
    Eureka,
    Consul,
}

impl ServiceDiscovery {
    pub const ALL: [ServiceDiscovery; 3] =
        [ServiceDiscovery::Eureka, ServiceDiscovery::Consul, ServiceDiscovery::No];

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceDiscovery::No => "no",
            ServiceDiscovery::Eureka => "eureka",
            ServiceDiscovery::Consul => "consul",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ServiceDiscovery::No => "No service discovery",
            ServiceDiscovery::Eureka => "JHipster Registry (uses Eureka)",
            ServiceDiscovery::Consul => "Consul",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|backend| backend.as_str() == value)
    }
}

// Older stores record a disabled backend as `false` rather than "no".
impl<'de> Deserialize<'de> for ServiceDiscovery {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(false) => Ok(ServiceDiscovery::No),
            Raw::Flag(true) => Err(de::Error::custom("service discovery must name a backend")),
            Raw::Name(name) => ServiceDiscovery::parse(&name).ok_or_else(|| {
                de::Error::custom(format!("unknown service discovery backend '{}'", name))
            }),
        }
    }
}

/// Kubernetes service type used to expose gateways and monoliths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServiceType {
    ClusterIP,
    NodePort,
    #[default]
    LoadBalancer,
    Ingress,
}

impl ServiceType {
    pub const ALL: [ServiceType; 4] =
        [ServiceType::LoadBalancer, ServiceType::NodePort, ServiceType::Ingress, ServiceType::ClusterIP];

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceType::ClusterIP => "ClusterIP",
            ServiceType::NodePort => "NodePort",
            ServiceType::LoadBalancer => "LoadBalancer",
            ServiceType::Ingress => "Ingress",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ServiceType::ClusterIP => "ClusterIP",
            ServiceType::NodePort => "NodePort",
            ServiceType::LoadBalancer => "LoadBalancer - Let a Kubernetes cloud provider automatically assign an IP",
            ServiceType::Ingress => "Ingress - Use a Kubernetes ingress controller to expose services",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// Service type rendered on the Kubernetes `Service`; ingress exposure sits behind a ClusterIP.
    pub fn service_spec_type(self) -> &'static str {
        match self {
            ServiceType::Ingress => ServiceType::ClusterIP.as_str(),
            other => other.as_str(),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
