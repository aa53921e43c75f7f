use crate::domain::{HostLayout, Settings};
use crate::ports::{ConfigStore, SetupCache, SetupDownloader};

/// Application context holding dependencies for command execution.
pub struct AppContext<S, C, D>
where
    S: ConfigStore,
    C: SetupCache,
    D: SetupDownloader,
{
    store: S,
    cache: C,
    downloader: D,
    layout: HostLayout,
    settings: Settings,
}

impl<S, C, D> AppContext<S, C, D>
where
    S: ConfigStore,
    C: SetupCache,
    D: SetupDownloader,
{
    /// Create a new application context.
    pub fn new(store: S, cache: C, downloader: D, layout: HostLayout, settings: Settings) -> Self {
        Self { store, cache, downloader, layout, settings }
    }

    /// Get a reference to the configuration store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a reference to the installer cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn downloader(&self) -> &D {
        &self.downloader
    }

    pub fn layout(&self) -> &HostLayout {
        &self.layout
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
