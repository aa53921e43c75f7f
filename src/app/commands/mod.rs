pub mod deps;
pub mod fetch;
pub mod generate;
pub mod init;
pub mod list;
pub mod toggle;
pub mod vm;
