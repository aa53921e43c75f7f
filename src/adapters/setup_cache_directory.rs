use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::ports::SetupCache;

const PARTIAL_SUFFIX: &str = ".part";

/// Setup cache backed by a flat directory (`scripts/setups`).
#[derive(Debug, Clone)]
pub struct DirectorySetupCache {
    dir: PathBuf,
}

impl DirectorySetupCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, file_name: &str) -> Result<PathBuf, AppError> {
        let path = Path::new(file_name);
        let is_plain_name = path.components().count() == 1
            && path.file_name().map(|name| name == path.as_os_str()).unwrap_or(false);
        if !is_plain_name {
            return Err(AppError::invalid_input(format!(
                "installer name '{}' must be a plain file name",
                file_name
            )));
        }
        Ok(self.dir.join(file_name))
    }
}

impl SetupCache for DirectorySetupCache {
    fn contains(&self, file_name: &str) -> bool {
        self.path_for(file_name).map(|path| path.is_file()).unwrap_or(false)
    }

    fn prepare(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    fn store_with<F>(&self, file_name: &str, fill: F) -> Result<u64, AppError>
    where
        F: FnOnce(&mut dyn Write) -> Result<u64, AppError>,
    {
        let target = self.path_for(file_name)?;
        let partial = self.dir.join(format!("{}{}", file_name, PARTIAL_SUFFIX));

        let result = write_then_rename(&partial, &target, fill);
        if result.is_err() {
            let _ = fs::remove_file(&partial);
        }
        result
    }
}

fn write_then_rename<F>(partial: &Path, target: &Path, fill: F) -> Result<u64, AppError>
where
    F: FnOnce(&mut dyn Write) -> Result<u64, AppError>,
{
    let mut writer = BufWriter::new(File::create(partial)?);
    let written = fill(&mut writer)?;
    writer.flush()?;
    drop(writer);
    fs::rename(partial, target)?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn stores_file_on_success() {
        let dir = tempdir().unwrap();
        let cache = DirectorySetupCache::new(dir.path().join("setups"));
        cache.prepare().unwrap();

        let written = cache.store_with("tool.exe", |sink| {
            sink.write_all(b"MZ-binary")?;
            Ok(9)
        });

        assert_eq!(written.unwrap(), 9);
        assert!(cache.contains("tool.exe"));
        assert_eq!(fs::read(cache.dir().join("tool.exe")).unwrap(), b"MZ-binary");
    }

    #[test]
    fn failed_fill_leaves_nothing_behind() {
        let dir = tempdir().unwrap();
        let cache = DirectorySetupCache::new(dir.path());

        let result = cache.store_with("tool.exe", |sink| {
            sink.write_all(b"half")?;
            Err(AppError::network("https://example.com/tool.exe", "connection reset"))
        });

        assert!(matches!(result, Err(AppError::Network { .. })));
        assert!(!cache.contains("tool.exe"));
        assert!(!dir.path().join("tool.exe.part").exists());
    }

    #[test]
    fn rejects_path_like_names() {
        let dir = tempdir().unwrap();
        let cache = DirectorySetupCache::new(dir.path());

        assert!(!cache.contains("../config.json"));
        let result = cache.store_with("sub/evil.exe", |_| Ok(0));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
