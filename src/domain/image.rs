//! Container image naming shared by every application of a deployment.

use super::application::DiscoveredApp;
use super::error::AppError;

/// Push command used when none has been configured.
pub const DEFAULT_PUSH_COMMAND: &str = "docker push";

/// Image names resolved for one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub folder: String,
    pub source_image_name: String,
    pub target_image_name: String,
}

/// Image names for every selected application plus the shared push command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolution {
    pub images: Vec<ResolvedImage>,
    pub docker_push_command: String,
}

impl ImageResolution {
    pub fn for_folder(&self, folder: &str) -> Option<&ResolvedImage> {
        self.images.iter().find(|image| image.folder == folder)
    }
}

/// Normalize a repository answer: blank means none, a trailing `/` is dropped.
pub fn normalize_repository(repository: Option<&str>) -> Option<String> {
    repository
        .map(|name| name.trim().trim_end_matches('/'))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Target image for an application, `<repository>/<base name>` when a repository is set.
pub fn target_image_name(repository: Option<&str>, base_name: &str) -> String {
    let image = base_name.to_lowercase();
    match normalize_repository(repository) {
        Some(repository) => format!("{}/{}", repository, image),
        None => image,
    }
}

/// Resolve image names for the selected applications, in selection order.
pub fn resolve_images(
    apps: &[DiscoveredApp],
    repository: Option<&str>,
    push_command: Option<&str>,
) -> Result<ImageResolution, AppError> {
    if apps.is_empty() {
        return Err(AppError::validation("No applications selected for deployment"));
    }

    let images = apps
        .iter()
        .map(|app| {
            let base_name = app.descriptor.base_name.trim();
            if base_name.is_empty() {
                return Err(AppError::configuration(
                    &app.path,
                    "build descriptor does not define a baseName",
                ));
            }
            Ok(ResolvedImage {
                folder: app.folder.clone(),
                source_image_name: base_name.to_lowercase(),
                target_image_name: target_image_name(repository, base_name),
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    let docker_push_command = push_command
        .map(str::trim)
        .filter(|command| !command.is_empty())
        .unwrap_or(DEFAULT_PUSH_COMMAND)
        .to_string();

    Ok(ImageResolution { images, docker_push_command })
}
