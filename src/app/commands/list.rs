use crate::domain::Config;

/// One catalog row as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSummary {
    /// 1-based position in the catalog.
    pub index: usize,
    pub name: String,
    pub enabled: bool,
    pub version: String,
    pub file: String,
    pub dependencies: Vec<String>,
}

impl ToolSummary {
    /// `1. [X] - git (v2.45.2) (Deps: a, b)`
    pub fn menu_line(&self) -> String {
        let version = if self.version.is_empty() { "N/A" } else { self.version.as_str() };
        let mut line = format!(
            "{}. [{}] - {} (v{})",
            self.index,
            if self.enabled { "X" } else { " " },
            self.name,
            version
        );
        if !self.dependencies.is_empty() {
            line.push_str(&format!(" (Deps: {})", self.dependencies.join(", ")));
        }
        line
    }
}

pub fn execute(config: &Config) -> Vec<ToolSummary> {
    config
        .tools
        .iter()
        .enumerate()
        .map(|(i, (name, entry))| ToolSummary {
            index: i + 1,
            name: name.to_string(),
            enabled: entry.enable,
            version: entry.version.clone(),
            file: entry.name.clone(),
            dependencies: entry.dependencies.clone(),
        })
        .collect()
}
