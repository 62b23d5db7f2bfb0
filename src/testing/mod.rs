//! In-memory port doubles and fixtures shared by unit tests.

mod fixtures;
mod memory_catalog;
mod memory_config_store;
mod recording_writer;
mod scripted_prompter;
mod stub_probe;

pub use fixtures::descriptor;
pub use memory_catalog::MemoryCatalog;
pub use memory_config_store::MemoryConfigStore;
pub use recording_writer::RecordingWriter;
pub use scripted_prompter::ScriptedPrompter;
pub use stub_probe::StubProbe;
