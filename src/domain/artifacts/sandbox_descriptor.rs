//! Windows Sandbox descriptor (`.wsb`) rendering.

use minijinja::context;
use serde::Serialize;

use crate::domain::layout::SANDBOX_SCRIPTS_DIR;
use crate::domain::{AppError, HostLayout, VmConfig};

use super::templates::{build_template_environment, render_template_by_name};

const TEMPLATE: &str = "sandbox.wsb.j2";

#[derive(Debug, Serialize)]
struct Element {
    name: &'static str,
    value: String,
}

#[derive(Debug, Serialize)]
struct FolderView {
    host: String,
    sandbox: String,
    /// Rendered verbatim; the descriptor wants lowercase `true`/`false`.
    read_only: &'static str,
}

fn read_only_text(read_only: bool) -> &'static str {
    if read_only { "true" } else { "false" }
}

/// Render the sandbox descriptor for `vm`.
///
/// Output depends only on `vm` and `layout`. Scalar elements appear only for
/// keys present in the document; the host `scripts` directory is always mapped
/// first, read-only.
pub fn render_sandbox_descriptor(vm: &VmConfig, layout: &HostLayout) -> Result<String, AppError> {
    let mut head = Vec::new();
    if let Some(vgpu) = &vm.vgpu {
        head.push(Element { name: "VGpu", value: vgpu.to_string() });
    }
    if let Some(networking) = &vm.networking {
        head.push(Element { name: "Networking", value: networking.to_string() });
    }
    if let Some(memory) = &vm.memory_in_mb {
        head.push(Element { name: "MemoryInMB", value: memory.to_megabytes().to_string() });
    }

    let mut folders = vec![FolderView {
        host: layout.scripts_dir().display().to_string(),
        sandbox: SANDBOX_SCRIPTS_DIR.to_string(),
        read_only: read_only_text(true),
    }];
    folders.extend(vm.mapped_folders.iter().map(|folder| FolderView {
        host: if folder.uses_default_host() {
            layout.setups_dir().display().to_string()
        } else {
            folder.host_folder.clone()
        },
        sandbox: folder.sandbox_folder.clone(),
        read_only: read_only_text(folder.read_only),
    }));

    let flags: Vec<Element> = vm
        .feature_flags()
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| Element { name, value: v.to_string() }))
        .collect();

    let env = build_template_environment()?;
    render_template_by_name(
        &env,
        TEMPLATE,
        &context! {
            head => head,
            logon_command => &vm.logon_command,
            mapped_folders => folders,
            flags => flags,
        },
    )
}
