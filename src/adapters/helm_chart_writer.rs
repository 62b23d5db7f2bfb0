//! Renders a deployment plan into Helm charts and helper scripts.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use include_dir::{Dir, DirEntry, include_dir};
use minijinja::{Environment, UndefinedBehavior, context};
use tracing::debug;

use crate::domain::{AppError, ApplicationConfig, DeploymentPlan, Monitoring, ServiceDiscovery, ServiceType};
use crate::ports::DescriptorWriter;

static HELM_TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/helm");

const TEMPLATE_SUFFIX: &str = ".j2";

/// Directory of the chart holding services shared by every application.
pub const SHARED_CHART: &str = "csvc";

/// Writes charts under a root directory, one `<app>-helm/` per application.
pub struct HelmChartWriter {
    root: PathBuf,
    env: Environment<'static>,
}

impl HelmChartWriter {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, AppError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        // Kubernetes `Secret` data is base64 encoded.
        env.add_filter("b64encode", |value: String| STANDARD.encode(value));
        register_templates(&mut env, &HELM_TEMPLATES)?;
        Ok(Self { root: root.into(), env })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Render every output file without touching the filesystem.
    pub fn render(&self, plan: &DeploymentPlan) -> Result<Vec<(PathBuf, String)>, AppError> {
        let mut files = Vec::new();

        for app in plan.apps() {
            let chart = format!("{}-helm", app.app_name);
            for template in app_templates(plan, app) {
                let content = self.render_template(&format!("app/{template}"), context! { plan => plan, app => app })?;
                files.push((Path::new(&chart).join(template), content));
            }
        }

        for template in shared_templates(plan) {
            let content = self.render_template(&format!("{SHARED_CHART}/{template}"), context! { plan => plan })?;
            files.push((Path::new(SHARED_CHART).join(template), content));
        }

        for script in crate::domain::SCRIPTS {
            files.push((PathBuf::from(script), self.render_template(script, context! { plan => plan })?));
        }
        Ok(files)
    }

    fn render_template(&self, name: &str, ctx: minijinja::Value) -> Result<String, AppError> {
        let template = self
            .env
            .get_template(&format!("{name}{TEMPLATE_SUFFIX}"))
            .map_err(|e| AppError::Template(format!("Template '{}' not found: {}", name, e)))?;
        template.render(ctx).map_err(|e| AppError::Template(format!("Failed to render '{}': {}", name, e)))
    }
}

impl DescriptorWriter for HelmChartWriter {
    fn write(&self, plan: &DeploymentPlan) -> Result<Vec<PathBuf>, AppError> {
        // Render everything first so a template failure leaves no partial output.
        let files = self.render(plan)?;

        for (relative, content) in &files {
            let path = self.root.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, content)?;
            debug!(path = %relative.display(), "written");
        }
        Ok(files.into_iter().map(|(relative, _)| relative).collect())
    }

    #[cfg(unix)]
    fn make_executable(&self, script: &str) -> Result<(), AppError> {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(self.root.join(script), fs::Permissions::from_mode(0o755))?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn make_executable(&self, _script: &str) -> Result<(), AppError> {
        Ok(())
    }
}

/// Chart files for one application, relative to its chart directory.
fn app_templates(plan: &DeploymentPlan, app: &ApplicationConfig) -> Vec<&'static str> {
    let mut templates = vec!["Chart.yaml", "values.yaml", "templates/deployment.yml", "templates/service.yml"];
    let edge = app.application_type.is_edge();
    if edge && plan.istio() {
        templates.push("templates/gateway.yml");
    } else if edge && plan.service_type() == ServiceType::Ingress {
        templates.push("templates/ingress.yml");
    }
    if plan.istio_route() {
        templates.push("templates/destination-rule.yml");
        templates.push("templates/virtual-service.yml");
    }
    templates
}

fn shared_templates(plan: &DeploymentPlan) -> Vec<&'static str> {
    let mut templates = vec!["Chart.yaml", "values.yaml", "templates/jwt-secret.yml"];
    if plan.service_discovery() == ServiceDiscovery::Eureka {
        templates.push("templates/jhipster-registry.yml");
    }
    if plan.monitoring() == Monitoring::Prometheus {
        templates.push("templates/service-monitor.yml");
    }
    templates
}

fn register_templates(env: &mut Environment<'static>, dir: &'static Dir<'static>) -> Result<(), AppError> {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(sub) => register_templates(env, sub)?,
            DirEntry::File(file) => {
                let name = file.path().to_str().ok_or_else(|| {
                    AppError::Template(format!("Template path is not UTF-8: {}", file.path().display()))
                })?;
                let source = file
                    .contents_utf8()
                    .ok_or_else(|| AppError::Template(format!("Template '{}' is not UTF-8", name)))?;
                env.add_template(name, source)
                    .map_err(|e| AppError::Template(format!("Failed to register template '{}': {}", name, e)))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Deserialize;

    use super::*;
    use crate::domain::{Answers, ApplicationType, DiscoveredApp, generate_secrets, resolve_images};
    use crate::testing::descriptor;
    use tempfile::TempDir;

    fn plan(answers: Answers, apps: Vec<DiscoveredApp>) -> DeploymentPlan {
        let images = resolve_images(&apps, answers.docker_repository_name.as_deref(), None).unwrap();
        let secrets = generate_secrets(Some("c2VjcmV0"), &mut rand::thread_rng());
        DeploymentPlan::builder().answers(answers).applications(apps).images(images).secrets(secrets).build().unwrap()
    }

    fn app(folder: &str, configure: impl FnOnce(&mut crate::domain::AppDescriptor)) -> DiscoveredApp {
        let mut descriptor = descriptor(folder);
        configure(&mut descriptor);
        DiscoveredApp { folder: folder.to_string(), path: Path::new("/work").join(folder), descriptor }
    }

    fn answers(folders: &[&str]) -> Answers {
        Answers {
            directory_path: Some("../".to_string()),
            apps_folders: folders.iter().map(|f| f.to_string()).collect(),
            ..Answers::default()
        }
    }

    fn rendered(plan: &DeploymentPlan) -> BTreeMap<String, String> {
        HelmChartWriter::new("/unused")
            .unwrap()
            .render(plan)
            .unwrap()
            .into_iter()
            .map(|(path, content)| (path.display().to_string(), content))
            .collect()
    }

    #[test]
    fn renders_one_chart_per_app_plus_shared_chart_and_scripts() {
        let plan = plan(
            Answers { namespace: "shop".to_string(), docker_repository_name: Some("myrepo".to_string()), ..answers(&["store"]) },
            vec![app("store", |_| {})],
        );

        let files = rendered(&plan);

        let names: Vec<_> = files.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            [
                "csvc/Chart.yaml",
                "csvc/templates/jwt-secret.yml",
                "csvc/values.yaml",
                "helm-apply.sh",
                "helm-upgrade.sh",
                "store-helm/Chart.yaml",
                "store-helm/templates/deployment.yml",
                "store-helm/templates/service.yml",
                "store-helm/values.yaml",
            ]
        );
        assert!(files["store-helm/templates/deployment.yml"].contains("image: myrepo/store"));
        assert!(files["store-helm/templates/deployment.yml"].contains("namespace: shop"));
        assert!(files["csvc/templates/jwt-secret.yml"].contains("secret: YzJWamNtVjA="));
        assert!(files["helm-apply.sh"].contains("helm install store ./store-helm --namespace \"$namespace\""));
        assert!(files["helm-upgrade.sh"].contains("helm upgrade --install store ./store-helm"));
    }

    #[test]
    fn rendered_yaml_documents_parse() {
        let plan = plan(
            Answers {
                service_discovery: ServiceDiscovery::Eureka,
                admin_password: Some("admin".to_string()),
                monitoring: Monitoring::Prometheus,
                clustered_db_apps: vec!["store".to_string()],
                ..answers(&["store", "gateway"])
            },
            vec![
                app("store", |d| {
                    d.prod_database_type = Some("mongodb".to_string());
                    d.message_broker = Some("kafka".to_string());
                }),
                app("gateway", |d| {
                    d.application_type = ApplicationType::Gateway;
                    d.prod_database_type = Some("postgresql".to_string());
                }),
            ],
        );

        for (path, content) in rendered(&plan) {
            if path.ends_with(".sh") {
                continue;
            }
            for document in serde_yaml::Deserializer::from_str(&content) {
                serde_yaml::Value::deserialize(document)
                    .unwrap_or_else(|e| panic!("{path} is not valid YAML: {e}\n{content}"));
            }
        }
    }

    #[test]
    fn clustered_mongodb_gets_a_replica_set() {
        let plan = plan(
            Answers { clustered_db_apps: vec!["store".to_string()], ..answers(&["store"]) },
            vec![app("store", |d| d.prod_database_type = Some("mongodb".to_string()))],
        );

        let files = rendered(&plan);

        assert!(files["store-helm/values.yaml"].contains("replicaCount: 3"));
        assert!(files["store-helm/templates/deployment.yml"].contains("store-mongodb-2.store-mongodb-headless"));
    }

    #[test]
    fn ingress_and_istio_files_follow_the_plan() {
        let ingress = plan(
            Answers {
                service_type: ServiceType::Ingress,
                ingress_domain: Some("example.com".to_string()),
                ..answers(&["gateway", "store"])
            },
            vec![app("gateway", |d| d.application_type = ApplicationType::Gateway), app("store", |_| {})],
        );
        let files = rendered(&ingress);
        assert!(files["gateway-helm/templates/ingress.yml"].contains("host: gateway.default.example.com"));
        assert!(!files.contains_key("store-helm/templates/ingress.yml"));

        let istio = plan(
            Answers {
                istio: true,
                istio_route: true,
                ingress_domain: Some("example.com".to_string()),
                ..answers(&["gateway"])
            },
            vec![app("gateway", |d| d.application_type = ApplicationType::Gateway)],
        );
        let files = rendered(&istio);
        assert!(files.contains_key("gateway-helm/templates/gateway.yml"));
        assert!(files.contains_key("gateway-helm/templates/destination-rule.yml"));
        assert!(files.contains_key("gateway-helm/templates/virtual-service.yml"));
        assert!(!files.contains_key("gateway-helm/templates/ingress.yml"));
    }

    #[test]
    fn edge_service_type_only_applies_to_gateways() {
        let plan = plan(
            Answers { service_type: ServiceType::NodePort, ..answers(&["gateway", "store"]) },
            vec![app("gateway", |d| d.application_type = ApplicationType::Gateway), app("store", |_| {})],
        );

        let files = rendered(&plan);

        assert!(files["gateway-helm/templates/service.yml"].contains("type: NodePort"));
        assert!(files["store-helm/templates/service.yml"].contains("type: ClusterIP"));
    }

    #[test]
    fn write_creates_files_and_scripts_become_executable() {
        let dir = TempDir::new().unwrap();
        let plan = plan(answers(&["store"]), vec![app("store", |_| {})]);
        let writer = HelmChartWriter::new(dir.path()).unwrap();

        let written = writer.write(&plan).unwrap();
        writer.make_executable("helm-apply.sh").unwrap();

        assert!(written.contains(&PathBuf::from("store-helm/Chart.yaml")));
        assert!(dir.path().join("csvc/templates/jwt-secret.yml").exists());
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(dir.path().join("helm-apply.sh")).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }
}
