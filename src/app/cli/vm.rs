//! VM configuration subcommands.

use std::io;
use std::path::Path;

use clap::Subcommand;

use crate::app::api;
use crate::app::cli::report;
use crate::domain::{AppError, MappedFolder};

#[derive(Subcommand)]
pub enum VmCommands {
    /// Print the VM configuration
    Show,
    /// Set a VM setting (e.g. MemoryInMB 8GB, Networking Disable)
    Set {
        /// Setting key as it appears in config.json
        key: String,
        value: String,
    },
    /// Map a host folder into the sandbox
    AddFolder {
        /// Host path, or 'Default' for the setup cache
        host: String,
        /// Path inside the sandbox
        #[arg(long)]
        sandbox: Option<String>,
        /// Allow the sandbox to write to the folder
        #[arg(long)]
        read_write: bool,
    },
    /// Remove a mapped folder by 1-based index
    RemoveFolder { index: usize },
}

pub fn run_vm(root: &Path, command: VmCommands) -> Result<(), AppError> {
    match command {
        VmCommands::Show => {
            let vm = api::vm_config_at(root)?;
            report::vm_config(&mut io::stdout(), &vm)?;
        }
        VmCommands::Set { key, value } => {
            api::vm_set_at(root, &key, &value)?;
            println!("✅ Set {} = {}", key, value);
        }
        VmCommands::AddFolder { host, sandbox, read_write } => {
            let mut folder = MappedFolder::new(host);
            if let Some(sandbox) = sandbox {
                folder.sandbox_folder = sandbox;
            }
            folder.read_only = !read_write;
            let host = folder.host_folder.clone();
            api::vm_add_folder_at(root, folder)?;
            println!("✅ Mapped folder added: {}", host);
        }
        VmCommands::RemoveFolder { index } => {
            let removed = api::vm_remove_folder_at(root, index)?;
            println!("✅ Removed mapped folder {}", removed.host_folder);
        }
    }
    Ok(())
}
