mod config_store;
mod line_prompt;
mod setup_cache;
mod setup_downloader;

pub use config_store::ConfigStore;
pub use line_prompt::LinePrompt;
pub use setup_cache::SetupCache;
pub use setup_downloader::SetupDownloader;
