//! Shared in-memory fakes for unit tests.

mod fake_downloader;
mod memory_setup_cache;

pub use fake_downloader::FakeDownloader;
pub use memory_setup_cache::MemorySetupCache;

use tempfile::TempDir;

use crate::adapters::MemoryConfigStore;
use crate::app::AppContext;
use crate::domain::{HostLayout, Settings};

/// In-memory collaborators plus a scratch root for generated files.
pub struct TestContext {
    pub root: TempDir,
    pub store: MemoryConfigStore,
    pub cache: MemorySetupCache,
    pub downloader: FakeDownloader,
    pub settings: Settings,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_store(MemoryConfigStore::new())
    }

    pub fn with_store(store: MemoryConfigStore) -> Self {
        Self {
            root: tempfile::tempdir().expect("failed to create temp dir"),
            store,
            cache: MemorySetupCache::new(),
            downloader: FakeDownloader::new(),
            settings: Settings::default(),
        }
    }

    pub fn with_cache(mut self, cache: MemorySetupCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_downloader(mut self, downloader: FakeDownloader) -> Self {
        self.downloader = downloader;
        self
    }

    pub fn layout(&self) -> HostLayout {
        HostLayout::new(self.root.path())
    }

    /// Context sharing state with the fakes held here.
    pub fn app(&self) -> AppContext<MemoryConfigStore, MemorySetupCache, FakeDownloader> {
        AppContext::new(
            self.store.clone(),
            self.cache.clone(),
            self.downloader.clone(),
            self.layout(),
            self.settings.clone(),
        )
    }
}
