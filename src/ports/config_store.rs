//! Configuration document persistence port.

use crate::domain::{AppError, Config};

/// Port for loading and persisting the configuration document.
pub trait ConfigStore {
    /// Load the current document.
    fn load(&self) -> Result<Config, AppError>;

    /// Persist `config`, replacing the stored document.
    fn save(&self, config: &Config) -> Result<(), AppError>;

    /// Whether a document exists yet.
    fn exists(&self) -> bool;
}
