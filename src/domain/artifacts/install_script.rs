//! Install script (`setup.cmd`) rendering.

use minijinja::context;
use serde::Serialize;

use crate::domain::layout::{INSTALL_SCRIPT_FILE, SANDBOX_SETUPS_DIR};
use crate::domain::setup_files::BOOTSTRAP_INSTALLER;
use crate::domain::{AppError, Config, DependencyGraph, InstallOrder};

use super::archetype::archetypes_for;
use super::templates::{build_template_environment, render_template_by_name};

const TEMPLATE: &str = "setup.cmd.j2";
const LOGON_TEMPLATE: &str = "start.cmd.j2";

#[derive(Debug, Serialize)]
struct ToolSection {
    name: String,
    blocks: Vec<String>,
}

/// Render the install script for the enabled tools of `config`.
///
/// Tools without a matching archetype get a header line and no commands.
pub fn render_install_script(config: &Config, order: InstallOrder) -> Result<String, AppError> {
    let env = build_template_environment()?;
    let graph = DependencyGraph::new(&config.tools);

    let mut tools = Vec::new();
    for (name, entry) in graph.install_order(order) {
        let mut blocks = Vec::new();
        for archetype in archetypes_for(name, entry) {
            let block = render_template_by_name(
                &env,
                archetype.template_name(),
                &context! { file => &entry.name },
            )?;
            blocks.push(block.trim_end().to_string());
        }
        if blocks.is_empty() {
            tracing::debug!(tool = name, "no install recipe, emitting header only");
        }
        tools.push(ToolSection { name: name.to_string(), blocks });
    }

    render_template_by_name(
        &env,
        TEMPLATE,
        &context! {
            setups_dir => SANDBOX_SETUPS_DIR,
            bootstrap_file => BOOTSTRAP_INSTALLER.file_name,
            tools => tools,
        },
    )
}

/// Render the logon launcher that runs the install script.
pub fn render_logon_script() -> Result<String, AppError> {
    let env = build_template_environment()?;
    render_template_by_name(&env, LOGON_TEMPLATE, &context! { install_script => INSTALL_SCRIPT_FILE })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::artifacts::InstallerArchetype;
    use crate::domain::{ToolCatalog, ToolEntry};

    const BOOTSTRAP_LINE: &str = r#"msiexec /i "%TEMP%\7z2409-x64.msi" /qn /norestart"#;

    fn entry(name: &str, enable: bool, deps: &[&str]) -> ToolEntry {
        ToolEntry {
            name: name.into(),
            enable,
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
            ..ToolEntry::default()
        }
    }

    fn config(tools: Vec<(&str, ToolEntry)>) -> Config {
        Config { tools: tools.into_iter().collect::<ToolCatalog>(), ..Config::default() }
    }

    #[test]
    fn empty_selection_has_preamble_and_postamble() {
        let script = render_install_script(&Config::default(), InstallOrder::default()).unwrap();
        assert!(script.starts_with("@echo off\n"));
        assert!(script.contains(
            "set SETUP_PATH=C:\\users\\WDAGUtilityAccount\\Desktop\\scripts\\setups\n"
        ));
        assert!(script.contains("copy /B /Y /V %SETUP_PATH%\\* %TEMP%\\\n\n"));
        assert_eq!(script.matches(BOOTSTRAP_LINE).count(), 1);
        assert!(script.contains("EnableScriptBlockLogging -Value 1"));
        assert!(script.ends_with("echo [*] All tasks completed.\npause\n"));
        assert!(!script.contains("Installing"));
    }

    #[test]
    fn bootstrap_line_appears_once_before_tools() {
        let cfg = config(vec![
            ("git", entry("Git-2.45.2-64-bit.exe", true, &[])),
            ("py2", entry("python-2.7.18.amd64.msi", true, &[])),
            ("vscode", entry("VSCodeUserSetup-x64.exe", true, &[])),
        ]);
        let script = render_install_script(&cfg, InstallOrder::default()).unwrap();

        assert_eq!(script.matches(BOOTSTRAP_LINE).count(), 1);
        let bootstrap_at = script.find(BOOTSTRAP_LINE).unwrap();
        assert!(bootstrap_at < script.find("Installing git").unwrap());
    }

    #[test]
    fn unmatched_tool_gets_header_only() {
        let cfg = config(vec![("wireshark", entry("Wireshark-4.2.5-x64.exe", true, &[]))]);
        let script = render_install_script(&cfg, InstallOrder::default()).unwrap();

        assert_eq!(script.matches("echo [*] Installing wireshark...").count(), 1);
        assert!(script.contains("echo [*] Installing wireshark...\n\necho [*] Enabling PowerShell"));
        assert!(!script.contains("Wireshark-4.2.5-x64.exe"));
    }

    #[test]
    fn disabled_tools_are_skipped() {
        let cfg = config(vec![
            ("git", entry("Git-2.45.2-64-bit.exe", false, &[])),
            ("vscode", entry("VSCodeUserSetup-x64.exe", true, &[])),
        ]);
        let script = render_install_script(&cfg, InstallOrder::default()).unwrap();
        assert!(!script.contains("Installing git"));
        assert!(script.contains(
            "echo [*] Installing vscode...\n\"%TEMP%\\VSCodeUserSetup-x64.exe\" /verysilent /suppressmsgboxes /MERGETASKS=\"!runcode,addtopath\"\n\n"
        ));
    }

    #[test]
    fn tools_follow_dependency_count_order() {
        let cfg = config(vec![
            ("oletools", entry("none", true, &["python3"])),
            ("python3", entry("python-3.12.4-amd64.exe", true, &[])),
        ]);
        let script = render_install_script(&cfg, InstallOrder::DependencyCount).unwrap();

        let python = script.find("Installing python3").unwrap();
        let oletools = script.find("Installing oletools").unwrap();
        assert!(python < oletools);
        assert!(script.contains("pip install -U oletools[full]"));
        assert!(script.contains("InstallAllUsers=1 PrependPath=1 Include_test=0"));
    }

    #[test]
    fn forensics_block_includes_secondary_download() {
        let cfg = config(vec![("eztools", entry("Get-ZimmermanTools.zip", true, &[]))]);
        let script = render_install_script(&cfg, InstallOrder::default()).unwrap();
        assert!(script.contains(r#"x -aoa "%TEMP%\Get-ZimmermanTools.zip""#));
        assert!(script.contains(r#"-File "Get-ZimmermanTools.ps1""#));
    }

    #[test]
    fn explicit_archetype_is_used() {
        let mut tagged = entry("portable-tools.zip", true, &[]);
        tagged.archetype = Some(InstallerArchetype::Diagnostics);
        let cfg = config(vec![("suite", tagged)]);
        let script = render_install_script(&cfg, InstallOrder::default()).unwrap();
        assert!(script.contains(
            r#""%PROGRAMFILES%\7-Zip\7z.exe" x -aoa "%TEMP%\portable-tools.zip" -o"%USERPROFILE%\Desktop\Tools\sysinternals""#
        ));
    }

    #[test]
    fn image_viewer_keeps_literal_percent_escapes() {
        let cfg = config(vec![("jpegview", entry("JPEGView_1.3.46.7z", true, &[]))]);
        let script = render_install_script(&cfg, InstallOrder::default()).unwrap();
        assert!(script.contains(
            r#"ftype JPEGView.Image="C:\Program Files\JPEGView64\JPEGView64.exe" "%%1""#
        ));
    }

    #[test]
    fn logon_script_calls_install_script() {
        let script = render_logon_script().unwrap();
        assert!(script.contains(r#"call "%~dp0setup.cmd""#));
    }
}
