use crate::domain::{AppDescriptor, ApplicationType, BuildTool};

/// A Maven microservice descriptor with no optional features enabled.
pub fn descriptor(base_name: &str) -> AppDescriptor {
    AppDescriptor {
        base_name: base_name.to_string(),
        application_type: ApplicationType::Microservice,
        build_tool: BuildTool::Maven,
        server_port: 8081,
        ..AppDescriptor::default()
    }
}
