pub mod artifacts;
pub mod config;
pub mod dependency_graph;
pub mod error;
pub mod layout;
pub mod settings;
pub mod setup_files;
pub mod tool_catalog;
pub mod vm_config;

pub use config::Config;
pub use dependency_graph::{DependencyGraph, EnablePlan, InstallOrder};
pub use error::AppError;
pub use layout::HostLayout;
pub use settings::{DownloadSettings, GenerateSettings, Settings};
pub use setup_files::{BOOTSTRAP_INSTALLER, BootstrapInstaller, MissingSetup, missing_setup_files};
pub use tool_catalog::{ToolCatalog, ToolEntry};
pub use vm_config::{MappedFolder, MemorySetting, Setting, VmConfig};
