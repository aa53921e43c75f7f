//! Artifact generation: sandbox descriptor, install script and logon launcher.

use std::fs;
use std::path::PathBuf;

use crate::app::AppContext;
use crate::app::commands::fetch::{self, FetchReport};
use crate::domain::artifacts::{
    render_install_script, render_logon_script, render_sandbox_descriptor,
};
use crate::domain::{AppError, Config};
use crate::ports::{ConfigStore, SetupCache, SetupDownloader};

#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Skip downloading; generate from whatever is cached.
    pub offline: bool,
}

#[derive(Debug)]
pub struct GenerateOutcome {
    pub fetch: Option<FetchReport>,
    pub descriptor: PathBuf,
    pub install_script: PathBuf,
    /// Set when the logon launcher did not exist and was written.
    pub logon_script: Option<PathBuf>,
    pub logon_command_updated: bool,
}

/// Execute the generate command.
pub fn execute<S, C, D>(
    ctx: &AppContext<S, C, D>,
    config: &mut Config,
    options: GenerateOptions,
) -> Result<GenerateOutcome, AppError>
where
    S: ConfigStore,
    C: SetupCache,
    D: SetupDownloader,
{
    let logon_command_updated = config.vm_config.ensure_logon_command();
    if logon_command_updated {
        ctx.store().save(config)?;
    }

    let fetch = if options.offline {
        None
    } else {
        Some(fetch::execute(config, ctx.cache(), ctx.downloader()))
    };

    let descriptor = write_descriptor(ctx, config)?;
    let install_script = write_install_script(ctx, config)?;
    let logon_script = write_logon_script(ctx)?;

    Ok(GenerateOutcome { fetch, descriptor, install_script, logon_script, logon_command_updated })
}

/// Render and write `WinSandbox.wsb`.
pub fn write_descriptor<S, C, D>(
    ctx: &AppContext<S, C, D>,
    config: &Config,
) -> Result<PathBuf, AppError>
where
    S: ConfigStore,
    C: SetupCache,
    D: SetupDownloader,
{
    let path = ctx.layout().descriptor_file();
    let content = render_sandbox_descriptor(&config.vm_config, ctx.layout())?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, content)?;
    tracing::info!(path = %path.display(), "sandbox descriptor written");
    Ok(path)
}

fn write_install_script<S, C, D>(
    ctx: &AppContext<S, C, D>,
    config: &Config,
) -> Result<PathBuf, AppError>
where
    S: ConfigStore,
    C: SetupCache,
    D: SetupDownloader,
{
    let path = ctx.layout().install_script_file();
    let content = render_install_script(config, ctx.settings().generate.install_order)?;
    fs::create_dir_all(ctx.layout().scripts_dir())?;
    fs::write(&path, content)?;
    tracing::info!(
        path = %path.display(),
        tools = config.tools.enabled().count(),
        "install script written"
    );
    Ok(path)
}

fn write_logon_script<S, C, D>(ctx: &AppContext<S, C, D>) -> Result<Option<PathBuf>, AppError>
where
    S: ConfigStore,
    C: SetupCache,
    D: SetupDownloader,
{
    let path = ctx.layout().logon_script_file();
    if path.exists() {
        return Ok(None);
    }
    fs::create_dir_all(ctx.layout().scripts_dir())?;
    fs::write(&path, render_logon_script()?)?;
    tracing::info!(path = %path.display(), "logon script written");
    Ok(Some(path))
}
