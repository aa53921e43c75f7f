pub mod config_filesystem;
pub mod dialoguer_prompt;
pub mod memory_config_store;
pub mod reader_prompt;
pub mod settings_file;
pub mod setup_cache_directory;
pub mod setup_downloader_http;

pub use config_filesystem::FilesystemConfigStore;
pub use dialoguer_prompt::DialoguerPrompt;
pub use memory_config_store::MemoryConfigStore;
pub use reader_prompt::ReaderPrompt;
pub use settings_file::load_settings;
pub use setup_cache_directory::DirectorySetupCache;
pub use setup_downloader_http::{HttpSetupDownloader, RetryPolicy};
