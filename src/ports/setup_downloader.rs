//! Installer download port.

use std::io::Write;

use url::Url;

use crate::domain::AppError;

/// Port for fetching installer bytes.
pub trait SetupDownloader {
    /// Stream the body behind `url` into `sink`, returning the byte count.
    fn download(&self, url: &Url, sink: &mut dyn Write) -> Result<u64, AppError>;
}
