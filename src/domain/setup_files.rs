//! Which installer files the setup cache still needs.

use crate::domain::{Config, ToolEntry};
use crate::ports::SetupCache;

/// Archiving utility installed before every tool; several installers are
/// archives unpacked with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapInstaller {
    pub label: &'static str,
    pub file_name: &'static str,
    pub url: &'static str,
}

pub const BOOTSTRAP_INSTALLER: BootstrapInstaller = BootstrapInstaller {
    label: "7-Zip",
    file_name: "7z2409-x64.msi",
    url: "https://www.7-zip.org/a/7z2409-x64.msi",
};

/// Enabled tool whose installer is absent from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingSetup<'a> {
    pub tool: &'a str,
    pub entry: &'a ToolEntry,
}

/// Enabled tools with a downloadable installer not yet cached, in catalog order.
pub fn missing_setup_files<'a, C: SetupCache + ?Sized>(
    config: &'a Config,
    cache: &C,
) -> Vec<MissingSetup<'a>> {
    config
        .tools
        .enabled()
        .filter(|(tool, entry)| {
            if !entry.requires_download() {
                tracing::debug!(tool, "no file download required");
                return false;
            }
            let cached = cache.contains(&entry.name);
            tracing::debug!(tool, file = %entry.name, cached, "checked setup cache");
            !cached
        })
        .map(|(tool, entry)| MissingSetup { tool, entry })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ToolCatalog;
    use crate::testing::MemorySetupCache;

    fn tool(name: &str, enable: bool) -> ToolEntry {
        ToolEntry {
            name: name.into(),
            link: format!("https://example.com/{}", name),
            enable,
            ..ToolEntry::default()
        }
    }

    #[test]
    fn reports_only_enabled_uncached_downloads() {
        let tools: ToolCatalog = [
            ("git", tool("Git-2.45.2-64-bit.exe", true)),
            ("vscode", tool("VSCodeSetup.exe", true)),
            ("python2", tool("python-2.7.18.amd64.msi", false)),
            ("oletools", tool("none", true)),
            ("registry-tweak", tool("", true)),
            ("dotnet", tool("dotnet-sdk-8.0.302-win-x64.exe", true)),
        ]
        .into_iter()
        .collect();
        let config = Config { tools, ..Config::default() };
        let cache = MemorySetupCache::with_files(["VSCodeSetup.exe"]);

        let missing = missing_setup_files(&config, &cache);
        let names: Vec<&str> = missing.iter().map(|m| m.tool).collect();
        assert_eq!(names, vec!["git", "dotnet"]);
    }

    #[test]
    fn nothing_missing_when_all_cached() {
        let tools: ToolCatalog = [("git", tool("git.exe", true))].into_iter().collect();
        let config = Config { tools, ..Config::default() };
        let cache = MemorySetupCache::with_files(["git.exe"]);
        assert!(missing_setup_files(&config, &cache).is_empty());
    }
}
