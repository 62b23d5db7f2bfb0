use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::info;

use super::question::{Answer, Choice, Question};
use super::{CollectContext, Collection};
use crate::domain::answers::{
    DEFAULT_ADMIN_PASSWORD, DEFAULT_DIRECTORY_PATH, DEFAULT_INGRESS_DOMAIN, DEFAULT_NAMESPACE,
};
use crate::domain::application::DiscoveredApp;
use crate::domain::deployment::{DeploymentType, Monitoring, ServiceDiscovery, ServiceType};
use crate::domain::image::{DEFAULT_PUSH_COMMAND, normalize_repository};
use crate::domain::reconcile::assemble_folder_paths;
use crate::domain::validation::{is_dns_label, is_domain};
use crate::domain::AppError;
use crate::ports::Prompter;

type Predicate = fn(&Collection) -> bool;
type Ask = fn(&mut dyn Prompter, &CollectContext<'_>, &mut Collection) -> Result<(), AppError>;

/// One question of the collector, gated by a predicate over what has been collected so far.
pub struct Step {
    pub name: &'static str,
    /// Answer fields this step fills in.
    pub produces: &'static [&'static str],
    pub applies: Predicate,
    pub ask: Ask,
}

/// The collector's questions, in the order they are asked.
pub const STEPS: &[Step] = &[
    Step { name: "application type", produces: &["applicationType"], applies: always, ask: ask_application_type },
    Step { name: "path", produces: &["directoryPath"], applies: always, ask: ask_path },
    Step { name: "apps", produces: &["appsFolders"], applies: always, ask: ask_apps },
    Step { name: "monitoring", produces: &["monitoring"], applies: always, ask: ask_monitoring },
    Step {
        name: "clusters mode",
        produces: &["clusteredDbApps"],
        applies: has_clusterable_db,
        ask: ask_clusters_mode,
    },
    Step {
        name: "service discovery",
        produces: &["serviceDiscoveryType"],
        applies: has_service_discovery,
        ask: ask_service_discovery,
    },
    Step { name: "admin password", produces: &["adminPassword"], applies: uses_eureka, ask: ask_admin_password },
    Step { name: "namespace", produces: &["kubernetesNamespace"], applies: always, ask: ask_namespace },
    Step {
        name: "docker repository",
        produces: &["dockerRepositoryName"],
        applies: always,
        ask: ask_docker_repository,
    },
    Step {
        name: "docker push command",
        produces: &["dockerPushCommand"],
        applies: always,
        ask: ask_docker_push_command,
    },
    Step { name: "istio", produces: &["istio"], applies: always, ask: ask_istio },
    Step { name: "istio route files", produces: &["istioRoute"], applies: uses_istio, ask: ask_istio_route },
    Step {
        name: "service type",
        produces: &["kubernetesServiceType"],
        applies: always,
        ask: ask_service_type,
    },
    Step {
        name: "ingress domain",
        produces: &["ingressDomain"],
        applies: needs_ingress_domain,
        ask: ask_ingress_domain,
    },
];

fn always(_: &Collection) -> bool {
    true
}

fn has_clusterable_db(collection: &Collection) -> bool {
    collection.apps.iter().any(|app| app.descriptor.has_clusterable_db())
}

fn has_service_discovery(collection: &Collection) -> bool {
    collection.apps.iter().any(|app| app.descriptor.service_discovery().is_some())
}

fn uses_eureka(collection: &Collection) -> bool {
    collection.answers.service_discovery == ServiceDiscovery::Eureka
}

fn uses_istio(collection: &Collection) -> bool {
    collection.answers.istio
}

fn needs_ingress_domain(collection: &Collection) -> bool {
    collection.answers.service_type == ServiceType::Ingress || collection.answers.istio
}

/// Ask until `accept` takes the answer; the prompter decides whether a rejection is fatal.
fn ask_until_valid<T>(
    prompter: &mut dyn Prompter,
    question: &Question,
    mut accept: impl FnMut(Answer) -> Result<T, AppError>,
) -> Result<T, AppError> {
    loop {
        let answer = prompter.ask(question)?;
        match accept(answer) {
            Ok(value) => return Ok(value),
            Err(err) => prompter.reject(question, &err.to_string())?,
        }
    }
}

fn normalize_directory(path: &str) -> String {
    if path.is_empty() {
        "./".to_string()
    } else if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

fn ask_application_type(
    prompter: &mut dyn Prompter,
    ctx: &CollectContext<'_>,
    collection: &mut Collection,
) -> Result<(), AppError> {
    let default = ctx.stored.application_type.unwrap_or_default();
    let question = Question::select(
        "applicationType",
        "Which *type* of application would you like to deploy?",
        DeploymentType::ALL.iter().map(|kind| Choice::new(kind.as_str(), kind.label())).collect(),
        default.as_str(),
    );
    let value = ask_until_valid(prompter, &question, |answer| question.expect_choice(answer))?;
    collection.answers.deployment_type = DeploymentType::parse(&value).unwrap_or_default();
    Ok(())
}

fn ask_path(
    prompter: &mut dyn Prompter,
    ctx: &CollectContext<'_>,
    collection: &mut Collection,
) -> Result<(), AppError> {
    let default =
        ctx.stored.directory_path.clone().unwrap_or_else(|| DEFAULT_DIRECTORY_PATH.to_string());
    let question = Question::input(
        "directoryPath",
        "Enter the root directory where your applications are located",
        Some(default),
    );
    let path = ask_until_valid(prompter, &question, |answer| {
        let path = normalize_directory(&question.expect_text(answer)?);
        let root = ctx.destination.join(&path);
        let found = ctx.catalog.list_applications(&root).map_err(|err| {
            AppError::validation(format!("{} is not a readable directory: {}", root.display(), err))
        })?;
        if found.is_empty() {
            return Err(AppError::validation(format!("No applications found in {}", root.display())));
        }
        info!(count = found.len(), path = %path, "applications found");
        Ok(path)
    })?;
    collection.answers.directory_path = Some(path);
    Ok(())
}

fn ask_apps(
    prompter: &mut dyn Prompter,
    ctx: &CollectContext<'_>,
    collection: &mut Collection,
) -> Result<(), AppError> {
    let root: Option<PathBuf> =
        collection.answers.directory_path.as_deref().map(|path| ctx.destination.join(path));
    let root = root.ok_or_else(|| {
        AppError::PathResolution("the application root directory was not collected".to_string())
    })?;
    let candidates = ctx.catalog.list_applications(&root)?;
    let choices: Vec<Choice> = candidates.iter().map(|folder| Choice::plain(folder.as_str())).collect();
    let stored = ctx.stored.apps_folders.clone().unwrap_or_default();

    let folders = match collection.answers.deployment_type {
        DeploymentType::Monolith => {
            let question = Question::select(
                "appsFolders",
                "Which application do you want to include?",
                choices,
                stored.first().map(String::as_str).unwrap_or_default(),
            );
            ask_until_valid(prompter, &question, |answer| {
                question.expect_choice(answer).map(|folder| vec![folder])
            })?
        }
        DeploymentType::Microservice => {
            let question = Question::multi_select(
                "appsFolders",
                "Which applications do you want to include in your configuration?",
                choices,
                &stored,
            );
            ask_until_valid(prompter, &question, |answer| {
                let folders = question.expect_choices(answer)?;
                if folders.is_empty() {
                    return Err(AppError::validation("You must choose at least one application"));
                }
                Ok(folders)
            })?
        }
    };

    let paths = assemble_folder_paths(&folders, Some(&root))?;
    let apps = folders
        .iter()
        .zip(paths)
        .map(|(folder, path)| {
            let descriptor = ctx.catalog.load_descriptor(&path)?;
            Ok(DiscoveredApp { folder: folder.clone(), path, descriptor })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    info!(selected = %folders.join(", "), "applications selected");
    collection.answers.apps_folders = folders;
    collection.apps = apps;
    Ok(())
}

fn ask_monitoring(
    prompter: &mut dyn Prompter,
    ctx: &CollectContext<'_>,
    collection: &mut Collection,
) -> Result<(), AppError> {
    let question = Question::select(
        "monitoring",
        "Do you want to setup monitoring for your applications ?",
        Monitoring::ALL.iter().map(|mode| Choice::new(mode.as_str(), mode.label())).collect(),
        ctx.stored.monitoring.unwrap_or_default().as_str(),
    );
    let value = ask_until_valid(prompter, &question, |answer| question.expect_choice(answer))?;
    collection.answers.monitoring = Monitoring::parse(&value).unwrap_or_default();
    Ok(())
}

fn ask_clusters_mode(
    prompter: &mut dyn Prompter,
    ctx: &CollectContext<'_>,
    collection: &mut Collection,
) -> Result<(), AppError> {
    let choices = collection
        .apps
        .iter()
        .filter(|app| app.descriptor.has_clusterable_db())
        .map(|app| Choice::plain(app.folder.as_str()))
        .collect();
    let question = Question::multi_select(
        "clusteredDbApps",
        "Which applications do you want to use with clustered databases (only available with MongoDB)?",
        choices,
        ctx.stored.clustered_db_apps.as_deref().unwrap_or_default(),
    );
    collection.answers.clustered_db_apps =
        ask_until_valid(prompter, &question, |answer| question.expect_choices(answer))?;
    Ok(())
}

fn ask_service_discovery(
    prompter: &mut dyn Prompter,
    ctx: &CollectContext<'_>,
    collection: &mut Collection,
) -> Result<(), AppError> {
    let backends: BTreeSet<&str> =
        collection.apps.iter().filter_map(|app| app.descriptor.service_discovery()).collect();
    let uniform = match backends.len() {
        1 => backends.first().and_then(|backend| ServiceDiscovery::parse(backend)),
        _ => None,
    };
    if let Some(backend) = uniform.filter(|backend| *backend != ServiceDiscovery::No) {
        info!(
            backend = backend.as_str(),
            "service discovery and configuration provider detected from the applications"
        );
        collection.answers.service_discovery = backend;
        return Ok(());
    }

    let question = Question::select(
        "serviceDiscoveryType",
        "Which Service Discovery registry and Configuration server would you like to use ?",
        ServiceDiscovery::ALL.iter().map(|backend| Choice::new(backend.as_str(), backend.label())).collect(),
        ctx.stored.service_discovery_type.unwrap_or(ServiceDiscovery::Eureka).as_str(),
    );
    let value = ask_until_valid(prompter, &question, |answer| question.expect_choice(answer))?;
    collection.answers.service_discovery = ServiceDiscovery::parse(&value).unwrap_or_default();
    Ok(())
}

fn ask_admin_password(
    prompter: &mut dyn Prompter,
    _ctx: &CollectContext<'_>,
    collection: &mut Collection,
) -> Result<(), AppError> {
    let question = Question::password(
        "adminPassword",
        "Enter the admin password used to secure the JHipster Registry",
        Some(DEFAULT_ADMIN_PASSWORD.to_string()),
    );
    let password = ask_until_valid(prompter, &question, |answer| {
        let password = question.expect_text(answer)?;
        if password.is_empty() {
            return Err(AppError::validation("The admin password cannot be empty"));
        }
        Ok(password)
    })?;
    collection.answers.admin_password = Some(password);
    Ok(())
}

fn ask_namespace(
    prompter: &mut dyn Prompter,
    ctx: &CollectContext<'_>,
    collection: &mut Collection,
) -> Result<(), AppError> {
    let default =
        ctx.stored.kubernetes_namespace.clone().unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
    let question = Question::input(
        "kubernetesNamespace",
        "What should we use for the Kubernetes namespace?",
        Some(default),
    );
    collection.answers.namespace = ask_until_valid(prompter, &question, |answer| {
        let namespace = question.expect_text(answer)?;
        if !is_dns_label(&namespace) {
            return Err(AppError::validation(format!(
                "'{}' is not a valid namespace: use lowercase letters, digits and '-'",
                namespace
            )));
        }
        Ok(namespace)
    })?;
    Ok(())
}

fn ask_docker_repository(
    prompter: &mut dyn Prompter,
    ctx: &CollectContext<'_>,
    collection: &mut Collection,
) -> Result<(), AppError> {
    let question = Question::input(
        "dockerRepositoryName",
        "What should we use for the base Docker repository name?",
        ctx.stored.docker_repository_name.clone(),
    );
    let repository = ask_until_valid(prompter, &question, |answer| question.expect_text(answer))?;
    collection.answers.docker_repository_name = normalize_repository(Some(&repository));
    Ok(())
}

fn ask_docker_push_command(
    prompter: &mut dyn Prompter,
    ctx: &CollectContext<'_>,
    collection: &mut Collection,
) -> Result<(), AppError> {
    let default =
        ctx.stored.docker_push_command.clone().unwrap_or_else(|| DEFAULT_PUSH_COMMAND.to_string());
    let question = Question::input(
        "dockerPushCommand",
        "What command should we use for push Docker image to repository?",
        Some(default),
    );
    collection.answers.docker_push_command = ask_until_valid(prompter, &question, |answer| {
        let command = question.expect_text(answer)?;
        if command.is_empty() {
            return Err(AppError::validation("The push command cannot be empty"));
        }
        Ok(command)
    })?;
    Ok(())
}

fn ask_istio(
    prompter: &mut dyn Prompter,
    ctx: &CollectContext<'_>,
    collection: &mut Collection,
) -> Result<(), AppError> {
    let question = Question::confirm("istio", "Do you want to enable Istio?", ctx.stored.istio.unwrap_or(false));
    collection.answers.istio = ask_until_valid(prompter, &question, |answer| question.expect_flag(answer))?;
    Ok(())
}

fn ask_istio_route(
    prompter: &mut dyn Prompter,
    ctx: &CollectContext<'_>,
    collection: &mut Collection,
) -> Result<(), AppError> {
    let question = Question::confirm(
        "istioRoute",
        "Do you want to generate Istio route files?",
        ctx.stored.istio_route.unwrap_or(false),
    );
    collection.answers.istio_route =
        ask_until_valid(prompter, &question, |answer| question.expect_flag(answer))?;
    Ok(())
}

fn ask_service_type(
    prompter: &mut dyn Prompter,
    ctx: &CollectContext<'_>,
    collection: &mut Collection,
) -> Result<(), AppError> {
    let question = Question::select(
        "kubernetesServiceType",
        "Choose the Kubernetes service type for your edge services",
        ServiceType::ALL.iter().map(|kind| Choice::new(kind.as_str(), kind.label())).collect(),
        ctx.stored.kubernetes_service_type.unwrap_or_default().as_str(),
    );
    let value = ask_until_valid(prompter, &question, |answer| question.expect_choice(answer))?;
    collection.answers.service_type = ServiceType::parse(&value).unwrap_or_default();
    Ok(())
}

fn ask_ingress_domain(
    prompter: &mut dyn Prompter,
    ctx: &CollectContext<'_>,
    collection: &mut Collection,
) -> Result<(), AppError> {
    let default =
        ctx.stored.ingress_domain.clone().unwrap_or_else(|| DEFAULT_INGRESS_DOMAIN.to_string());
    let question = Question::input(
        "ingressDomain",
        "What is the root FQDN for your ingress services (e.g. example.com, sub.domain.co, www.10.10.10.10.nip.io,...)?",
        Some(default),
    );
    let domain = ask_until_valid(prompter, &question, |answer| {
        let domain = question.expect_text(answer)?;
        if !is_domain(&domain) {
            return Err(AppError::validation(format!("'{}' is not a valid domain name", domain)));
        }
        Ok(domain)
    })?;
    collection.answers.ingress_domain = Some(domain);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_names_and_fields_are_unique() {
        let names: BTreeSet<_> = STEPS.iter().map(|step| step.name).collect();
        let fields: BTreeSet<_> = STEPS.iter().flat_map(|step| step.produces.iter()).collect();
        assert_eq!(names.len(), STEPS.len());
        assert_eq!(fields.len(), STEPS.len());
    }

    #[test]
    fn directory_answers_get_a_trailing_slash() {
        assert_eq!(normalize_directory("../apps"), "../apps/");
        assert_eq!(normalize_directory("../"), "../");
        assert_eq!(normalize_directory(""), "./");
    }
}
