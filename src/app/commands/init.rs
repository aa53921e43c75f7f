use crate::app::AppContext;
use crate::domain::{AppError, Config};
use crate::ports::{ConfigStore, SetupCache, SetupDownloader};

const STARTER_CATALOG: &str = include_str!("../../assets/default_config.json");

/// Parse the starter configuration bundled with the binary.
pub fn starter_config() -> Result<Config, AppError> {
    Config::parse_json(STARTER_CATALOG)
        .map_err(|e| AppError::Internal(format!("Bundled starter catalog is invalid: {}", e)))
}

/// Execute the init command.
///
/// Writes the starter catalog and creates the setup cache directory. An
/// existing document is kept unless `force` is set.
pub fn execute<S, C, D>(ctx: &AppContext<S, C, D>, force: bool) -> Result<Config, AppError>
where
    S: ConfigStore,
    C: SetupCache,
    D: SetupDownloader,
{
    if ctx.store().exists() && !force {
        return Err(AppError::ConfigExists(ctx.layout().config_file().display().to_string()));
    }

    let config = starter_config()?;
    ctx.store().save(&config)?;
    ctx.cache().prepare()?;
    tracing::info!(tools = config.tools.len(), "starter configuration written");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryConfigStore;
    use crate::domain::artifacts::{InstallerArchetype, archetypes_for};
    use crate::testing::TestContext;

    #[test]
    fn starter_catalog_covers_every_archetype() {
        let config = starter_config().unwrap();
        let mut covered: Vec<InstallerArchetype> = config
            .tools
            .iter()
            .flat_map(|(tool, entry)| archetypes_for(tool, entry))
            .collect();
        covered.dedup();

        for archetype in InstallerArchetype::ALL {
            assert!(covered.contains(&archetype), "{:?} has no starter tool", archetype);
        }
        assert!(config.tools.iter().all(|(_, entry)| !entry.enable));
    }

    #[test]
    fn init_writes_starter_catalog() {
        let ctx = TestContext::new();

        let config = execute(&ctx.app(), false).unwrap();

        assert_eq!(ctx.store.load().unwrap(), config);
        assert!(ctx.cache.is_prepared());
        assert_eq!(config.tools.key_at(0), Some("jpegview"));
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let ctx = TestContext::with_store(MemoryConfigStore::with_config(Config::default()));

        let err = execute(&ctx.app(), false).unwrap_err();
        assert!(matches!(err, AppError::ConfigExists(_)));
        assert_eq!(ctx.store.save_count(), 0);

        execute(&ctx.app(), true).unwrap();
        assert_eq!(ctx.store.save_count(), 1);
    }
}
