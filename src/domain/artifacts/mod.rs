//! Generated artifacts: sandbox descriptor and install scripts.

pub mod archetype;
pub mod install_script;
pub mod sandbox_descriptor;
mod templates;

pub use archetype::{InstallerArchetype, archetypes_for};
pub use install_script::{render_install_script, render_logon_script};
pub use sandbox_descriptor::render_sandbox_descriptor;
