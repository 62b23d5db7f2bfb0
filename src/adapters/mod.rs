pub mod dialoguer_prompter;
pub mod filesystem_catalog;
pub mod helm_chart_writer;
pub mod helm_probe;
pub mod json_config_store;
pub mod preset_prompter;

pub use dialoguer_prompter::DialoguerPrompter;
pub use filesystem_catalog::FilesystemCatalog;
pub use helm_chart_writer::HelmChartWriter;
pub use helm_probe::HelmProbe;
pub use json_config_store::JsonConfigStore;
pub use preset_prompter::PresetPrompter;
