//! CLI Adapter.

pub mod interactive;
mod report;
mod vm;

use std::io::{self, BufReader, IsTerminal};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::adapters::{DialoguerPrompt, ReaderPrompt};
use crate::app::api::{self, GenerateOptions, SessionEnd};
use crate::app::logging::init_tracing;
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "sandbox-setup")]
#[command(version)]
#[command(
    about = "Configure a Windows Sandbox: tool catalog, installer downloads and generated .wsb/setup.cmd",
    long_about = None
)]
struct Cli {
    /// Directory holding config.json and the generated files (defaults to current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive configuration menu (default)
    #[clap(visible_alias = "c")]
    Configure,
    /// Write the starter tool catalog to config.json
    #[clap(visible_alias = "i")]
    Init {
        /// Overwrite an existing config.json
        #[arg(short, long)]
        force: bool,
    },
    /// List tools with index, state, version and dependencies
    #[clap(visible_alias = "ls")]
    Tools,
    /// Enable or disable a tool by name or 1-based index
    #[clap(visible_alias = "t")]
    Toggle {
        /// Tool name or index from `tools`
        tool: String,
    },
    /// Show the transitive dependencies of a tool
    Deps {
        /// Tool name or index from `tools`
        tool: String,
    },
    /// Show or edit the VM configuration
    Vm {
        #[command(subcommand)]
        command: vm::VmCommands,
    },
    /// Download the bootstrap utility and missing installers
    #[clap(visible_alias = "f")]
    Fetch,
    /// Fetch missing installers, then write WinSandbox.wsb and scripts/setup.cmd
    #[clap(visible_alias = "g")]
    Generate {
        /// Skip downloads and generate from the current cache
        #[arg(long)]
        offline: bool,
    },
}

/// Entry point for the CLI.
pub fn run() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.root {
        Some(root) => dispatch(&root, cli.command),
        None => std::env::current_dir()
            .map_err(AppError::from)
            .and_then(|root| dispatch(&root, cli.command)),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch(root: &Path, command: Option<Commands>) -> Result<(), AppError> {
    match command.unwrap_or(Commands::Configure) {
        Commands::Configure => run_configure(root),
        Commands::Init { force } => run_init(root, force),
        Commands::Tools => run_tools(root),
        Commands::Toggle { tool } => run_toggle(root, &tool),
        Commands::Deps { tool } => run_deps(root, &tool),
        Commands::Vm { command } => vm::run_vm(root, command),
        Commands::Fetch => run_fetch(root),
        Commands::Generate { offline } => run_generate(root, offline),
    }
}

fn run_configure(root: &Path) -> Result<(), AppError> {
    let mut out = io::stdout();
    let end = if io::stdin().is_terminal() {
        api::configure_at(root, &mut DialoguerPrompt, &mut out)?
    } else {
        let mut prompt = ReaderPrompt::new(BufReader::new(io::stdin()), io::stdout());
        api::configure_at(root, &mut prompt, &mut out)?
    };
    if let SessionEnd::InputClosed = end {
        println!();
        println!("Input closed, leaving configuration.");
    }
    Ok(())
}

fn run_init(root: &Path, force: bool) -> Result<(), AppError> {
    let config = api::init_at(root, force)?;
    println!("✅ Initialized config.json with {} tool(s)", config.tools.len());
    Ok(())
}

fn run_tools(root: &Path) -> Result<(), AppError> {
    let rows = api::tools_at(root)?;
    if rows.is_empty() {
        println!("ℹ️ No tools configured");
        return Ok(());
    }
    println!("Available Tools:");
    for row in rows {
        println!("{}", row.menu_line());
    }
    Ok(())
}

fn run_toggle(root: &Path, tool: &str) -> Result<(), AppError> {
    let outcome = api::toggle_at(root, tool)?;
    report::toggle(&mut io::stdout(), &outcome)?;
    Ok(())
}

fn run_deps(root: &Path, tool: &str) -> Result<(), AppError> {
    let (tool, deps) = api::dependencies_at(root, tool)?;
    if deps.is_empty() {
        println!("ℹ️ {} has no dependencies", tool);
        return Ok(());
    }
    println!("Dependencies of {}:", tool);
    for dep in deps {
        println!("  • {}", dep);
    }
    Ok(())
}

fn run_fetch(root: &Path) -> Result<(), AppError> {
    let report = api::fetch_at(root)?;
    report::fetch(&mut io::stdout(), &report)?;
    Ok(())
}

fn run_generate(root: &Path, offline: bool) -> Result<(), AppError> {
    let outcome = api::generate_at(root, GenerateOptions { offline })?;
    report::generate(&mut io::stdout(), &outcome)?;
    Ok(())
}
