mod application_catalog;
mod config_store;
mod descriptor_writer;
mod prompter;
mod tool_probe;

pub use application_catalog::ApplicationCatalog;
pub use config_store::ConfigStore;
pub use descriptor_writer::DescriptorWriter;
pub use prompter::Prompter;
pub use tool_probe::ToolProbe;
