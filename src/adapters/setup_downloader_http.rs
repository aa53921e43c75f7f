//! Installer downloads over HTTP using reqwest.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use url::Url;

use crate::domain::{AppError, DownloadSettings};
use crate::ports::SetupDownloader;

const MAX_DELAY_MS: u64 = 30_000;
const USER_AGENT: &str = concat!("sandbox-setup/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn from_settings(settings: &DownloadSettings) -> Self {
        Self {
            max_attempts: settings.max_retries.max(1),
            base_delay_ms: settings.retry_delay_ms.max(1),
            max_delay_ms: MAX_DELAY_MS.max(settings.retry_delay_ms),
        }
    }

    fn delay_for_retry(&self, failed_attempt: u32) -> Duration {
        // attempt=1 -> base, attempt=2 -> base*2, attempt=3 -> base*4, capped.
        let exponent = failed_attempt.saturating_sub(1).min(6);
        let backoff_ms = self.base_delay_ms.saturating_mul(1_u64 << exponent).min(self.max_delay_ms);
        let jitter_ms = compute_jitter_ms(backoff_ms);
        Duration::from_millis(backoff_ms.saturating_add(jitter_ms).min(self.max_delay_ms))
    }
}

/// Failure of a single request attempt, before any body byte was written.
#[derive(Debug)]
struct AttemptError {
    details: String,
    retryable: bool,
}

/// HTTP transport for installer files.
///
/// Retries cover connection failures, timeouts, 429 and 5xx responses. Once the
/// body starts streaming into the sink a failure is final.
#[derive(Debug, Clone)]
pub struct HttpSetupDownloader {
    client: Client,
    policy: RetryPolicy,
}

impl HttpSetupDownloader {
    pub fn new(settings: &DownloadSettings) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, policy: RetryPolicy::from_settings(settings) })
    }

    fn send_once(&self, url: &Url) -> Result<Response, AttemptError> {
        let response = self.client.get(url.clone()).send().map_err(|e| AttemptError {
            retryable: e.is_connect() || e.is_timeout(),
            details: format!("HTTP request failed: {}", e),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(AttemptError { details: format!("server returned {}", status), retryable: is_retryable_status(status) })
    }

    fn send_with_retry(&self, url: &Url) -> Result<Response, AppError> {
        let mut attempt = 1;
        loop {
            match self.send_once(url) {
                Ok(response) => return Ok(response),
                Err(error) if error.retryable && attempt < self.policy.max_attempts => {
                    let delay = self.policy.delay_for_retry(attempt);
                    tracing::warn!(
                        url = %url,
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "download attempt failed: {}",
                        error.details
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(error) => return Err(AppError::network(url.as_str(), error.details)),
            }
        }
    }
}

impl SetupDownloader for HttpSetupDownloader {
    fn download(&self, url: &Url, sink: &mut dyn Write) -> Result<u64, AppError> {
        let mut response = self.send_with_retry(url)?;
        let written = io::copy(&mut response, sink)
            .map_err(|e| AppError::network(url.as_str(), format!("transfer interrupted: {}", e)))?;
        tracing::debug!(url = %url, bytes = written, "download complete");
        Ok(written)
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
}

fn compute_jitter_ms(backoff_ms: u64) -> u64 {
    let jitter_cap = backoff_ms / 4;
    if jitter_cap == 0 {
        return 0;
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.subsec_nanos() as u64)
        .unwrap_or(0);

    nanos % jitter_cap
}
