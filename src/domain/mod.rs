pub mod answers;
pub mod application;
pub mod collector;
pub mod deployment;
pub mod error;
pub mod image;
pub mod plan;
pub mod reconcile;
pub mod report;
pub mod secret;
pub mod store;
pub mod validation;
pub mod warning;

pub use answers::Answers;
pub use application::{
    APP_DESCRIPTOR_FILE, APP_DESCRIPTOR_SECTION, AppDescriptor, ApplicationConfig, ApplicationType,
    BuildTool, DiscoveredApp,
};
pub use deployment::{DeploymentType, Monitoring, ServiceDiscovery, ServiceType};
pub use error::AppError;
pub use image::{ImageResolution, ResolvedImage, resolve_images};
pub use plan::{DeploymentPlan, DeploymentPlanBuilder};
pub use report::{APPLY_SCRIPT, CompletionReport, PushInstruction, SCRIPTS, UPGRADE_SCRIPT};
pub use secret::{Secrets, generate_secrets};
pub use store::{STORE_FILE, StoredConfig};
pub use warning::AdvisoryWarning;
