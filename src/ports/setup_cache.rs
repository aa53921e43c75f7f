//! Installer cache port.

use std::io::Write;

use crate::domain::AppError;

/// Port for the flat directory of downloaded installer files.
pub trait SetupCache {
    /// Whether an installer named `file_name` is cached.
    fn contains(&self, file_name: &str) -> bool;

    /// Create the cache location if needed.
    fn prepare(&self) -> Result<(), AppError>;

    /// Store `file_name` with content produced by `fill`.
    ///
    /// The file becomes visible only when `fill` succeeds; on error nothing is
    /// left behind under `file_name`.
    fn store_with<F>(&self, file_name: &str, fill: F) -> Result<u64, AppError>
    where
        F: FnOnce(&mut dyn Write) -> Result<u64, AppError>;
}
