use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

use url::Url;

use crate::domain::AppError;
use crate::ports::SetupDownloader;

/// Downloader answering from a URL table and recording every request.
#[derive(Debug, Clone, Default)]
pub struct FakeDownloader {
    responses: HashMap<String, Result<Vec<u8>, String>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: &[u8]) -> Self {
        self.responses.insert(url.to_string(), Ok(body.to_vec()));
        self
    }

    pub fn with_failure(mut self, url: &str, details: &str) -> Self {
        self.responses.insert(url.to_string(), Err(details.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl SetupDownloader for FakeDownloader {
    fn download(&self, url: &Url, sink: &mut dyn Write) -> Result<u64, AppError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.responses.get(url.as_str()) {
            Some(Ok(body)) => {
                sink.write_all(body)?;
                Ok(body.len() as u64)
            }
            Some(Err(details)) => Err(AppError::network(url.as_str(), details.clone())),
            None => Err(AppError::network(url.as_str(), "server returned 404 Not Found")),
        }
    }
}
