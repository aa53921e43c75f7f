//! User-facing rendering of command outcomes.

use std::io::{self, Write};

use crate::app::commands::fetch::{FetchReport, FetchStatus, FetchedFile};
use crate::app::commands::generate::GenerateOutcome;
use crate::app::commands::toggle::ToggleOutcome;
use crate::domain::VmConfig;

pub fn toggle<W: Write>(out: &mut W, outcome: &ToggleOutcome) -> io::Result<()> {
    match outcome {
        ToggleOutcome::Enabled { tool, auto_enabled, already_enabled, unknown } => {
            for dep in auto_enabled {
                writeln!(out, "✅ Auto-enabled dependency: {}", dep)?;
            }
            for dep in already_enabled {
                writeln!(out, "ℹ️ Dependency already enabled: {}", dep)?;
            }
            for dep in unknown {
                writeln!(out, "⚠️ Dependency '{}' not found in available tools", dep)?;
            }
            writeln!(out, "✅ Enabled {}", tool)
        }
        ToggleOutcome::Disabled { tool, dependents } => {
            writeln!(out, "✅ Disabled {}", tool)?;
            if !dependents.is_empty() {
                writeln!(
                    out,
                    "⚠️ The following tools depend on {}: {}",
                    tool,
                    dependents.join(", ")
                )?;
                writeln!(out, "   Consider disabling these tools first or they may not work properly.")?;
            }
            Ok(())
        }
    }
}

pub fn vm_config<W: Write>(out: &mut W, vm: &VmConfig) -> io::Result<()> {
    for (key, value) in vm.scalar_entries() {
        writeln!(out, "{}: {}", key, value)?;
    }
    if vm.mapped_folders.is_empty() {
        return Ok(());
    }
    writeln!(out, "MappedFolder:")?;
    for (i, folder) in vm.mapped_folders.iter().enumerate() {
        writeln!(
            out,
            "  {}. Host: {}, Sandbox: {}, ReadOnly: {}",
            i + 1,
            folder.host_folder,
            folder.sandbox_folder,
            folder.read_only
        )?;
    }
    Ok(())
}

fn fetched_file<W: Write>(out: &mut W, file: &FetchedFile) -> io::Result<()> {
    match &file.status {
        FetchStatus::Downloaded { bytes } => {
            writeln!(out, "✅ Downloaded {} ({}, {} bytes)", file.tool, file.file_name, bytes)
        }
        FetchStatus::AlreadyPresent => writeln!(out, "ℹ️ {} already present", file.file_name),
        FetchStatus::Failed { reason } => {
            writeln!(out, "❌ Failed to download {}: {}", file.tool, reason)
        }
    }
}

pub fn fetch<W: Write>(out: &mut W, report: &FetchReport) -> io::Result<()> {
    if !matches!(report.bootstrap.status, FetchStatus::AlreadyPresent) {
        fetched_file(out, &report.bootstrap)?;
    }
    if report.files.is_empty() {
        return writeln!(out, "✅ All required setup files are present");
    }
    for file in &report.files {
        fetched_file(out, file)?;
    }
    let failed = report.failures().count();
    if failed > 0 {
        writeln!(out, "⚠️ {} file(s) could not be downloaded", failed)?;
    }
    Ok(())
}

pub fn generate<W: Write>(out: &mut W, outcome: &GenerateOutcome) -> io::Result<()> {
    if let Some(report) = &outcome.fetch {
        fetch(out, report)?;
    }
    if outcome.logon_command_updated {
        writeln!(out, "ℹ️ LogonCommand set to launch the tools setup script")?;
    }
    writeln!(out, "✅ Wrote {}", outcome.descriptor.display())?;
    writeln!(out, "✅ Wrote {}", outcome.install_script.display())?;
    if let Some(path) = &outcome.logon_script {
        writeln!(out, "✅ Wrote {}", path.display())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(outcome: &ToggleOutcome) -> String {
        let mut out = Vec::new();
        toggle(&mut out, outcome).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn disabled_with_dependents_warns() {
        let text = render(&ToggleOutcome::Disabled {
            tool: "python3".into(),
            dependents: vec!["oletools".into()],
        });
        assert!(text.starts_with("✅ Disabled python3\n"));
        assert!(text.contains("depend on python3: oletools"));
    }

    #[test]
    fn enabled_lists_dependencies_first() {
        let text = render(&ToggleOutcome::Enabled {
            tool: "oletools".into(),
            auto_enabled: vec!["python3".into()],
            already_enabled: vec![],
            unknown: vec!["pip".into()],
        });
        assert_eq!(
            text,
            "✅ Auto-enabled dependency: python3\n⚠️ Dependency 'pip' not found in available tools\n✅ Enabled oletools\n"
        );
    }
}
