//! Interactive configuration menu.

use std::io::Write;
use std::str::FromStr;

use crate::app::AppContext;
use crate::app::cli::report;
use crate::app::commands::generate::{self, GenerateOptions, GenerateOutcome};
use crate::app::commands::{list, toggle};
use crate::domain::vm_config::DEFAULT_SANDBOX_FOLDER;
use crate::domain::{AppError, Config, MappedFolder};
use crate::ports::{ConfigStore, LinePrompt, SetupCache, SetupDownloader};

/// How a menu session ended.
#[derive(Debug)]
pub enum SessionEnd {
    /// `done`: installers fetched and artifacts written.
    Finished(GenerateOutcome),
    /// `exit`: nothing generated.
    Exited,
    /// Input ended before a terminal choice.
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Tool,
    Vm,
    Done,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tool" => Ok(MenuChoice::Tool),
            "vm" => Ok(MenuChoice::Vm),
            "done" => Ok(MenuChoice::Done),
            "exit" => Ok(MenuChoice::Exit),
            other => Err(AppError::invalid_input(format!(
                "'{}' is not a menu choice (tool, vm, done, exit)",
                other
            ))),
        }
    }
}

/// Whether a sub-menu returned normally or hit the end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Closed,
}

/// Run the main menu until `done`, `exit` or end of input.
///
/// Invalid selections are reported and the loop continues; only store and
/// filesystem failures end the session with an error.
pub fn run<S, C, D, P, W>(
    ctx: &AppContext<S, C, D>,
    config: &mut Config,
    prompt: &mut P,
    out: &mut W,
) -> Result<SessionEnd, AppError>
where
    S: ConfigStore,
    C: SetupCache,
    D: SetupDownloader,
    P: LinePrompt,
    W: Write,
{
    loop {
        print_summary(config, out)?;

        let Some(line) = prompt.read_line("Choice")? else {
            return Ok(SessionEnd::InputClosed);
        };
        let choice = match line.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(err) => {
                writeln!(out, "❌ {}", err)?;
                continue;
            }
        };

        match choice {
            MenuChoice::Tool => {
                if tool_menu(ctx, config, prompt, out)? == Flow::Closed {
                    return Ok(SessionEnd::InputClosed);
                }
            }
            MenuChoice::Vm => {
                if vm_editor(ctx, config, prompt, out)? == Flow::Closed {
                    return Ok(SessionEnd::InputClosed);
                }
            }
            MenuChoice::Done => {
                writeln!(out, "Checking for missing setup files...")?;
                let outcome = generate::execute(ctx, config, GenerateOptions::default())?;
                report::generate(out, &outcome)?;
                return Ok(SessionEnd::Finished(outcome));
            }
            MenuChoice::Exit => {
                writeln!(out, "Exiting configuration.")?;
                return Ok(SessionEnd::Exited);
            }
        }
    }
}

fn print_summary<W: Write>(config: &Config, out: &mut W) -> Result<(), AppError> {
    let available: Vec<&str> = config.tools.keys().collect();
    let enabled: Vec<&str> = config.tools.enabled().map(|(name, _)| name).collect();

    writeln!(out)?;
    writeln!(out, "Current configuration:")?;
    writeln!(out, "  • Available tools: {}", available.join(", "))?;
    writeln!(out, "  • Enabled tools: {}", enabled.join(", "))?;
    writeln!(out, "  • VM configuration:")?;
    report::vm_config(out, &config.vm_config)?;
    writeln!(out)?;
    writeln!(out, "Enter 'tool' to change tools or 'vm' to change the VM configuration.")?;
    writeln!(out, "Enter 'done' to fetch installers and generate the sandbox files.")?;
    writeln!(out, "Enter 'exit' to quit without generating.")?;
    Ok(())
}

fn tool_menu<S, C, D, P, W>(
    ctx: &AppContext<S, C, D>,
    config: &mut Config,
    prompt: &mut P,
    out: &mut W,
) -> Result<Flow, AppError>
where
    S: ConfigStore,
    C: SetupCache,
    D: SetupDownloader,
    P: LinePrompt,
    W: Write,
{
    loop {
        writeln!(out)?;
        writeln!(out, "Available Tools:")?;
        for row in list::execute(config) {
            writeln!(out, "{}", row.menu_line())?;
        }

        let Some(line) = prompt.read_line("Number of the tool to toggle, or 'done' to finish")? else {
            return Ok(Flow::Closed);
        };
        if line.trim().eq_ignore_ascii_case("done") {
            return Ok(Flow::Continue);
        }

        let tool = match toggle::resolve_tool(config, &line) {
            Ok(tool) => tool,
            Err(_) => {
                writeln!(out, "❌ Invalid input. Please enter a valid number.")?;
                continue;
            }
        };
        let outcome = toggle::execute(ctx, config, &tool)?;
        report::toggle(out, &outcome)?;
    }
}

fn vm_editor<S, C, D, P, W>(
    ctx: &AppContext<S, C, D>,
    config: &mut Config,
    prompt: &mut P,
    out: &mut W,
) -> Result<Flow, AppError>
where
    S: ConfigStore,
    C: SetupCache,
    D: SetupDownloader,
    P: LinePrompt,
    W: Write,
{
    writeln!(out, "Current VM Configuration:")?;
    report::vm_config(out, &config.vm_config)?;
    writeln!(out)?;
    writeln!(out, "Enter new values (leave blank to keep the current value):")?;

    for (key, current) in config.vm_config.scalar_entries() {
        if key == "LogonCommand" {
            continue;
        }
        let Some(input) = prompt.read_line(&format!("{} (current: {})", key, current))? else {
            return Ok(Flow::Closed);
        };
        if input.trim().is_empty() {
            continue;
        }
        if let Err(err) = config.vm_config.set_field(&key, &input) {
            writeln!(out, "❌ {}", err)?;
        }
    }

    if mapped_folder_menu(config, prompt, out)? == Flow::Closed {
        return Ok(Flow::Closed);
    }

    if config.vm_config.ensure_logon_command() {
        writeln!(out, "ℹ️ LogonCommand set to launch the tools setup script")?;
    }
    writeln!(out)?;
    writeln!(out, "Final VM Configuration:")?;
    report::vm_config(out, &config.vm_config)?;

    ctx.store().save(config)?;
    generate::write_descriptor(ctx, config)?;
    writeln!(out, "✅ VM configuration updated and WSB file regenerated")?;
    Ok(Flow::Continue)
}

fn mapped_folder_menu<P, W>(config: &mut Config, prompt: &mut P, out: &mut W) -> Result<Flow, AppError>
where
    P: LinePrompt,
    W: Write,
{
    let Some(action) = prompt.read_line("Add or remove a mapped folder? (add/remove/none)")? else {
        return Ok(Flow::Closed);
    };

    match action.trim().to_lowercase().as_str() {
        "add" => {
            let Some(host) = prompt.read_line("Host folder path ('Default' for the setup cache)")? else {
                return Ok(Flow::Closed);
            };
            if host.trim().is_empty() {
                writeln!(out, "❌ Host folder must not be empty")?;
                return Ok(Flow::Continue);
            }
            let Some(sandbox) =
                prompt.read_line(&format!("Sandbox folder path (default: {})", DEFAULT_SANDBOX_FOLDER))?
            else {
                return Ok(Flow::Closed);
            };
            let Some(read_only) = prompt.read_line("Read only? (yes/no, default: yes)")? else {
                return Ok(Flow::Closed);
            };

            let mut folder = MappedFolder::new(host.trim());
            if !sandbox.trim().is_empty() {
                folder.sandbox_folder = sandbox.trim().to_string();
            }
            folder.read_only = !matches!(read_only.trim().to_lowercase().as_str(), "no" | "n");
            config.vm_config.add_mapped_folder(folder);
            writeln!(out, "✅ Mapped folder added")?;
        }
        "remove" => {
            if config.vm_config.mapped_folders.is_empty() {
                writeln!(out, "ℹ️ No mapped folders to remove")?;
                return Ok(Flow::Continue);
            }
            for (i, folder) in config.vm_config.mapped_folders.iter().enumerate() {
                writeln!(
                    out,
                    "  {}. Host: {}, Sandbox: {}, ReadOnly: {}",
                    i + 1,
                    folder.host_folder,
                    folder.sandbox_folder,
                    folder.read_only
                )?;
            }
            let Some(choice) = prompt.read_line("Number to remove (or 'none' to cancel)")? else {
                return Ok(Flow::Closed);
            };
            let choice = choice.trim();
            if choice.is_empty() || choice.eq_ignore_ascii_case("none") {
                return Ok(Flow::Continue);
            }
            let removed = choice
                .parse::<usize>()
                .map_err(|_| AppError::invalid_input(format!("'{}' is not a number", choice)))
                .and_then(|index| config.vm_config.remove_mapped_folder(index));
            match removed {
                Ok(folder) => writeln!(out, "✅ Removed mapped folder {}", folder.host_folder)?,
                Err(err) => writeln!(out, "❌ {}", err)?,
            }
        }
        "" | "none" => {}
        other => writeln!(out, "❌ Unknown action '{}', mapped folders unchanged", other)?,
    }
    Ok(Flow::Continue)
}
