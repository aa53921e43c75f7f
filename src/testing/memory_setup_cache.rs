use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::SetupCache;

#[derive(Debug, Clone, Default)]
pub struct MemorySetupCache {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    prepared: Arc<Mutex<bool>>,
}

impl MemorySetupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let cache = Self::new();
        {
            let mut files = cache.files.lock().unwrap();
            for name in names {
                files.insert(name.to_string(), Vec::new());
            }
        }
        cache
    }

    pub fn content(&self, name: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(name).cloned()
    }

    pub fn is_prepared(&self) -> bool {
        *self.prepared.lock().unwrap()
    }
}

impl SetupCache for MemorySetupCache {
    fn contains(&self, file_name: &str) -> bool {
        self.files.lock().unwrap().contains_key(file_name)
    }

    fn prepare(&self) -> Result<(), AppError> {
        *self.prepared.lock().unwrap() = true;
        Ok(())
    }

    fn store_with<F>(&self, file_name: &str, fill: F) -> Result<u64, AppError>
    where
        F: FnOnce(&mut dyn Write) -> Result<u64, AppError>,
    {
        let mut buffer = Vec::new();
        let written = fill(&mut buffer)?;
        self.files.lock().unwrap().insert(file_name.to_string(), buffer);
        Ok(written)
    }
}
