//! API Facade for the application.
//!
//! Each function opens the filesystem-backed context for a root directory,
//! loads the configuration document and runs one command against it.

use std::io::Write;
use std::path::Path;

use crate::adapters::{
    DirectorySetupCache, FilesystemConfigStore, HttpSetupDownloader, load_settings,
};
use crate::app::AppContext;
use crate::app::cli::interactive;
use crate::app::commands::{deps, fetch, generate, init, list, toggle, vm};
use crate::domain::{HostLayout, VmConfig};
use crate::ports::{ConfigStore, LinePrompt};

pub use crate::app::cli::interactive::SessionEnd;
pub use crate::app::commands::fetch::{FetchReport, FetchStatus, FetchedFile};
pub use crate::app::commands::generate::{GenerateOptions, GenerateOutcome};
pub use crate::app::commands::list::ToolSummary;
pub use crate::app::commands::toggle::ToggleOutcome;
pub use crate::domain::{AppError, Config, MappedFolder};

/// Context wired to the real filesystem and network.
pub type FilesystemContext = AppContext<FilesystemConfigStore, DirectorySetupCache, HttpSetupDownloader>;

/// Create an `AppContext` rooted at `root`.
pub fn create_context(root: &Path) -> Result<FilesystemContext, AppError> {
    let layout = HostLayout::absolute(root)?;
    let settings = load_settings(&layout.settings_file())?;
    let store = FilesystemConfigStore::new(layout.config_file());
    let cache = DirectorySetupCache::new(layout.setups_dir());
    let downloader = HttpSetupDownloader::new(&settings.download)?;
    Ok(AppContext::new(store, cache, downloader, layout, settings))
}

/// Write the starter catalog to `<root>/config.json`.
pub fn init_at(root: &Path, force: bool) -> Result<Config, AppError> {
    let ctx = create_context(root)?;
    init::execute(&ctx, force)
}

/// List the tool catalog.
pub fn tools_at(root: &Path) -> Result<Vec<ToolSummary>, AppError> {
    let ctx = create_context(root)?;
    let config = ctx.store().load()?;
    Ok(list::execute(&config))
}

/// Toggle a tool selected by name or 1-based index.
pub fn toggle_at(root: &Path, selector: &str) -> Result<ToggleOutcome, AppError> {
    let ctx = create_context(root)?;
    let mut config = ctx.store().load()?;
    let tool = toggle::resolve_tool(&config, selector)?;
    toggle::execute(&ctx, &mut config, &tool)
}

/// Transitive dependencies of a tool, returned with the resolved tool name.
pub fn dependencies_at(root: &Path, selector: &str) -> Result<(String, Vec<String>), AppError> {
    let ctx = create_context(root)?;
    let config = ctx.store().load()?;
    deps::execute(&config, selector)
}

pub fn vm_config_at(root: &Path) -> Result<VmConfig, AppError> {
    let ctx = create_context(root)?;
    Ok(ctx.store().load()?.vm_config)
}

pub fn vm_set_at(root: &Path, key: &str, value: &str) -> Result<(), AppError> {
    let ctx = create_context(root)?;
    let mut config = ctx.store().load()?;
    vm::set(&ctx, &mut config, key, value)
}

pub fn vm_add_folder_at(root: &Path, folder: MappedFolder) -> Result<(), AppError> {
    let ctx = create_context(root)?;
    let mut config = ctx.store().load()?;
    vm::add_folder(&ctx, &mut config, folder)
}

pub fn vm_remove_folder_at(root: &Path, index: usize) -> Result<MappedFolder, AppError> {
    let ctx = create_context(root)?;
    let mut config = ctx.store().load()?;
    vm::remove_folder(&ctx, &mut config, index)
}

/// Download the bootstrap utility and every missing installer.
pub fn fetch_at(root: &Path) -> Result<FetchReport, AppError> {
    let ctx = create_context(root)?;
    let config = ctx.store().load()?;
    Ok(fetch::execute(&config, ctx.cache(), ctx.downloader()))
}

/// Fetch (unless offline) and write the sandbox artifacts.
pub fn generate_at(root: &Path, options: GenerateOptions) -> Result<GenerateOutcome, AppError> {
    let ctx = create_context(root)?;
    let mut config = ctx.store().load()?;
    generate::execute(&ctx, &mut config, options)
}

/// Run the interactive menu against `<root>`.
pub fn configure_at<P, W>(root: &Path, prompt: &mut P, out: &mut W) -> Result<SessionEnd, AppError>
where
    P: LinePrompt,
    W: Write,
{
    let ctx = create_context(root)?;
    let mut config = ctx.store().load()?;
    interactive::run(&ctx, &mut config, prompt, out)
}
