use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::domain::{AppError, Config};
use crate::ports::ConfigStore;

/// Filesystem-backed configuration store (`config.json`).
#[derive(Debug, Clone)]
pub struct FilesystemConfigStore {
    path: PathBuf,
}

impl FilesystemConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ConfigStore for FilesystemConfigStore {
    fn load(&self) -> Result<Config, AppError> {
        let content = fs::read_to_string(&self.path).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                AppError::ConfigMissing(self.path.display().to_string())
            } else {
                AppError::Io(err)
            }
        })?;
        Config::parse_json(&content)
    }

    fn save(&self, config: &Config) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, config.to_json_pretty()?)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ToolEntry;
    use tempfile::tempdir;

    #[test]
    fn load_missing_file_is_config_missing() {
        let dir = tempdir().unwrap();
        let store = FilesystemConfigStore::new(dir.path().join("config.json"));

        assert!(!store.exists());
        assert!(matches!(store.load(), Err(AppError::ConfigMissing(_))));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = FilesystemConfigStore::new(dir.path().join("config.json"));

        let mut config = Config::default();
        config.tools.insert("git", ToolEntry { name: "git.exe".into(), ..ToolEntry::default() });
        store.save(&config).unwrap();

        assert!(store.exists());
        assert_eq!(store.load().unwrap(), config);
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("{\n    \"tools\""));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{\"tools\": [1, 2]}").unwrap();

        let err = FilesystemConfigStore::new(path).load().unwrap_err();
        assert!(matches!(err, AppError::ParseError { .. }));
    }
}
