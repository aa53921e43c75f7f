//! Host and sandbox path layout.
//!
//! Everything lives under one root directory on the host:
//!
//! ```text
//! <root>/config.json
//! <root>/sandbox-setup.toml      (optional)
//! <root>/WinSandbox.wsb
//! <root>/scripts/setup.cmd
//! <root>/scripts/start.cmd
//! <root>/scripts/setups/<installer files>
//! ```

use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";
pub const SETTINGS_FILE: &str = "sandbox-setup.toml";
pub const DESCRIPTOR_FILE: &str = "WinSandbox.wsb";
pub const SCRIPTS_DIR: &str = "scripts";
pub const SETUPS_DIR: &str = "setups";
pub const INSTALL_SCRIPT_FILE: &str = "setup.cmd";
pub const LOGON_SCRIPT_FILE: &str = "start.cmd";

/// Where the host `scripts` directory appears inside the sandbox.
pub const SANDBOX_SCRIPTS_DIR: &str = r"C:\Users\WDAGUtilityAccount\Desktop\scripts";

/// Installer directory as seen by the generated install script.
pub const SANDBOX_SETUPS_DIR: &str = r"C:\users\WDAGUtilityAccount\Desktop\scripts\setups";

/// Host-side paths derived from the root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostLayout {
    root: PathBuf,
}

impl HostLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Layout rooted at an absolute form of `root`, so generated host paths
    /// stay valid when the sandbox host resolves them.
    pub fn absolute(root: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self::new(std::path::absolute(root)?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    pub fn descriptor_file(&self) -> PathBuf {
        self.root.join(DESCRIPTOR_FILE)
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.root.join(SCRIPTS_DIR)
    }

    pub fn setups_dir(&self) -> PathBuf {
        self.scripts_dir().join(SETUPS_DIR)
    }

    pub fn install_script_file(&self) -> PathBuf {
        self.scripts_dir().join(INSTALL_SCRIPT_FILE)
    }

    pub fn logon_script_file(&self) -> PathBuf {
        self.scripts_dir().join(LOGON_SCRIPT_FILE)
    }
}
