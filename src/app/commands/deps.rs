use crate::domain::{AppError, Config, DependencyGraph};

use super::toggle::resolve_tool;

/// Transitive dependencies of the selected tool, sorted by name.
pub fn execute(config: &Config, selector: &str) -> Result<(String, Vec<String>), AppError> {
    let tool = resolve_tool(config, selector)?;
    let deps = DependencyGraph::new(&config.tools).transitive_dependencies(&tool);
    Ok((tool, deps.into_iter().collect()))
}
