use crate::app::AppContext;
use crate::domain::{AppError, Config, MappedFolder};
use crate::ports::{ConfigStore, SetupCache, SetupDownloader};

/// Set a VM setting by document key and persist.
pub fn set<S, C, D>(
    ctx: &AppContext<S, C, D>,
    config: &mut Config,
    key: &str,
    value: &str,
) -> Result<(), AppError>
where
    S: ConfigStore,
    C: SetupCache,
    D: SetupDownloader,
{
    config.vm_config.set_field(key.trim(), value)?;
    ctx.store().save(config)?;
    tracing::info!(key, "vm setting updated");
    Ok(())
}

/// Append a mapped folder and persist.
pub fn add_folder<S, C, D>(
    ctx: &AppContext<S, C, D>,
    config: &mut Config,
    folder: MappedFolder,
) -> Result<(), AppError>
where
    S: ConfigStore,
    C: SetupCache,
    D: SetupDownloader,
{
    if folder.host_folder.trim().is_empty() {
        return Err(AppError::invalid_input("host folder must not be empty"));
    }
    config.vm_config.add_mapped_folder(folder);
    ctx.store().save(config)
}

/// Remove the mapped folder at 1-based `index` and persist.
pub fn remove_folder<S, C, D>(
    ctx: &AppContext<S, C, D>,
    config: &mut Config,
    index: usize,
) -> Result<MappedFolder, AppError>
where
    S: ConfigStore,
    C: SetupCache,
    D: SetupDownloader,
{
    let removed = config.vm_config.remove_mapped_folder(index)?;
    ctx.store().save(config)?;
    Ok(removed)
}
