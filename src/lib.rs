//! sandbox-setup: configure a Windows Sandbox from a tool catalog.
//!
//! The library keeps the configuration document, resolves tool dependencies,
//! fetches missing installers and renders the sandbox descriptor and install
//! scripts. The binary is a thin clap/dialoguer layer over [`app::api`].

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    FetchReport, FetchStatus, FetchedFile, GenerateOptions, GenerateOutcome, SessionEnd,
    ToggleOutcome, ToolSummary, configure_at, create_context, dependencies_at, fetch_at,
    generate_at, init_at, toggle_at, tools_at, vm_add_folder_at, vm_config_at, vm_remove_folder_at,
    vm_set_at,
};
pub use domain::{AppError, Config, MappedFolder, VmConfig};
