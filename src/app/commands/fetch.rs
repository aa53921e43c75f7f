//! Setup-file fetcher: downloads the bootstrap utility and missing installers.

use url::Url;

use crate::domain::{AppError, BOOTSTRAP_INSTALLER, Config, missing_setup_files};
use crate::ports::{SetupCache, SetupDownloader};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Downloaded { bytes: u64 },
    AlreadyPresent,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedFile {
    /// Tool key, or the bootstrap utility's label.
    pub tool: String,
    pub file_name: String,
    pub status: FetchStatus,
}

impl FetchedFile {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, FetchStatus::Failed { .. })
    }
}

/// Outcome of one fetch pass. Failures are recorded here, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub bootstrap: FetchedFile,
    /// Enabled tools that were missing when the pass started, in catalog order.
    pub files: Vec<FetchedFile>,
}

impl FetchReport {
    pub fn failures(&self) -> impl Iterator<Item = &FetchedFile> {
        std::iter::once(&self.bootstrap).chain(&self.files).filter(|f| f.is_failure())
    }

    pub fn downloaded(&self) -> usize {
        std::iter::once(&self.bootstrap)
            .chain(&self.files)
            .filter(|f| matches!(f.status, FetchStatus::Downloaded { .. }))
            .count()
    }
}

/// Fetch the bootstrap utility if absent, then every missing installer.
pub fn execute<C, D>(config: &Config, cache: &C, downloader: &D) -> FetchReport
where
    C: SetupCache,
    D: SetupDownloader,
{
    if let Err(err) = cache.prepare() {
        tracing::warn!(error = %err, "setup cache could not be prepared");
    }

    let bootstrap = FetchedFile {
        tool: BOOTSTRAP_INSTALLER.label.to_string(),
        file_name: BOOTSTRAP_INSTALLER.file_name.to_string(),
        status: if cache.contains(BOOTSTRAP_INSTALLER.file_name) {
            FetchStatus::AlreadyPresent
        } else {
            fetch_one(cache, downloader, BOOTSTRAP_INSTALLER.file_name, BOOTSTRAP_INSTALLER.url)
        },
    };

    let missing = missing_setup_files(config, cache);
    let mut files = Vec::with_capacity(missing.len());
    for item in missing {
        // Two tools may share one installer.
        let status = if cache.contains(&item.entry.name) {
            FetchStatus::AlreadyPresent
        } else {
            fetch_one(cache, downloader, &item.entry.name, &item.entry.link)
        };
        files.push(FetchedFile {
            tool: item.tool.to_string(),
            file_name: item.entry.name.clone(),
            status,
        });
    }

    FetchReport { bootstrap, files }
}

fn fetch_one<C, D>(cache: &C, downloader: &D, file_name: &str, link: &str) -> FetchStatus
where
    C: SetupCache,
    D: SetupDownloader,
{
    let url = match parse_link(link) {
        Ok(url) => url,
        Err(err) => {
            tracing::warn!(file = file_name, error = %err, "skipping download");
            return FetchStatus::Failed { reason: err.to_string() };
        }
    };

    tracing::info!(file = file_name, url = %url, "downloading");
    match cache.store_with(file_name, |sink| downloader.download(&url, sink)) {
        Ok(bytes) => FetchStatus::Downloaded { bytes },
        Err(err) => {
            tracing::warn!(file = file_name, error = %err, "download failed");
            FetchStatus::Failed { reason: err.to_string() }
        }
    }
}

fn parse_link(link: &str) -> Result<Url, AppError> {
    let link = link.trim();
    if link.is_empty() {
        return Err(AppError::invalid_input("no download link configured"));
    }
    let url = Url::parse(link)
        .map_err(|e| AppError::invalid_input(format!("invalid download link '{}': {}", link, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::invalid_input(format!("unsupported link scheme '{}'", other))),
    }
}
