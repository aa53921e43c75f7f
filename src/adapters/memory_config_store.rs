use std::sync::{Arc, Mutex};

use crate::domain::{AppError, Config};
use crate::ports::ConfigStore;

/// In-memory configuration store that records every save.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    // Shared so clones observe the same document and history.
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    current: Option<Config>,
    saves: Vec<Config>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `config`; seeding does not count as a save.
    pub fn with_config(config: Config) -> Self {
        let store = Self::new();
        store.state.lock().unwrap().current = Some(config);
        store
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.state.lock().unwrap().saves.len()
    }

    /// Snapshots passed to `save`, oldest first.
    pub fn saved(&self) -> Vec<Config> {
        self.state.lock().unwrap().saves.clone()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<Config, AppError> {
        self.state
            .lock()
            .unwrap()
            .current
            .clone()
            .ok_or_else(|| AppError::ConfigMissing("<memory>".into()))
    }

    fn save(&self, config: &Config) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state.current = Some(config.clone());
        state.saves.push(config.clone());
        Ok(())
    }

    fn exists(&self) -> bool {
        self.state.lock().unwrap().current.is_some()
    }
}
