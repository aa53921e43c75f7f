use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::domain::{AppError, Settings};

/// Load `sandbox-setup.toml`; a missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings, AppError> {
    match fs::read_to_string(path) {
        Ok(content) => Settings::parse_toml(&content),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Settings::default())
        }
        Err(err) => Err(AppError::Io(err)),
    }
}
