//! Shared testing utilities for sandbox-setup CLI tests.

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const BOOTSTRAP_FILE: &str = "7z2409-x64.msi";

/// Isolated sandbox-setup root directory.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Build a command for the compiled binary pointed at this root.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("sandbox-setup").expect("Failed to locate binary");
        cmd.arg("--root").arg(self.root()).env_remove("RUST_LOG");
        cmd
    }

    pub fn config_path(&self) -> PathBuf {
        self.root().join("config.json")
    }

    pub fn write_config(&self, json: &str) {
        fs::write(self.config_path(), json).expect("Failed to write config.json");
    }

    pub fn read_config(&self) -> Value {
        let raw = fs::read_to_string(self.config_path()).expect("Failed to read config.json");
        serde_json::from_str(&raw).expect("config.json is not valid JSON")
    }

    pub fn tool_enabled(&self, tool: &str) -> bool {
        self.read_config()["tools"][tool]["enable"].as_bool().unwrap_or(false)
    }

    pub fn setups_dir(&self) -> PathBuf {
        self.root().join("scripts").join("setups")
    }

    /// Pre-populate the installer cache so no download is attempted.
    pub fn seed_cache(&self, files: &[&str]) {
        fs::create_dir_all(self.setups_dir()).expect("Failed to create setups dir");
        for file in files {
            fs::write(self.setups_dir().join(file), b"cached").expect("Failed to seed cache");
        }
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }
}

/// Two tools where `B` depends on `A`, plus a small VM section.
pub const TWO_TOOLS: &str = r#"{
    "tools": {
        "A": {"name": "a-setup.exe", "version": "1.0", "link": "https://example.invalid/a-setup.exe", "enable": false, "dependencies": []},
        "B": {"name": "none", "version": "2.0", "link": "", "enable": false, "dependencies": ["A"]}
    },
    "vmConfig": {
        "Networking": "Enable",
        "MemoryInMB": "8GB"
    }
}"#;
