//! Tool settings loaded from `sandbox-setup.toml`.

use serde::{Deserialize, Serialize};

use crate::domain::{AppError, InstallOrder};

/// Optional tuning for downloads and generation. Every field has a default, so
/// a missing file behaves like an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub download: DownloadSettings,
    #[serde(default)]
    pub generate: GenerateSettings,
}

impl Settings {
    /// Parse and validate settings content.
    pub fn parse_toml(content: &str) -> Result<Self, AppError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.download.validate()
    }
}

/// HTTP download behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DownloadSettings {
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Attempts per file, including the first.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay between attempts in milliseconds, doubled per retry.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl DownloadSettings {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidSettings("timeout_secs must be greater than 0".into()));
        }
        if self.max_retries == 0 {
            return Err(AppError::InvalidSettings("max_retries must be greater than 0".into()));
        }
        if self.retry_delay_ms == 0 {
            return Err(AppError::InvalidSettings("retry_delay_ms must be greater than 0".into()));
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

/// Artifact generation behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateSettings {
    #[serde(default)]
    pub install_order: InstallOrder,
}
