use crate::app::AppContext;
use crate::domain::{AppError, Config, DependencyGraph};
use crate::ports::{ConfigStore, SetupCache, SetupDownloader};

/// Result of flipping a tool's `enable` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Enabled {
        tool: String,
        /// Dependencies switched on by this toggle, in discovery order.
        auto_enabled: Vec<String>,
        already_enabled: Vec<String>,
        /// Dependency names missing from the catalog.
        unknown: Vec<String>,
    },
    Disabled {
        tool: String,
        /// Enabled tools that still list the disabled tool as a dependency.
        dependents: Vec<String>,
    },
}

/// Resolve a tool by catalog key, falling back to a 1-based index.
pub fn resolve_tool(config: &Config, selector: &str) -> Result<String, AppError> {
    let selector = selector.trim();
    if config.tools.contains(selector) {
        return Ok(selector.to_string());
    }
    selector
        .parse::<usize>()
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|index| config.tools.key_at(index))
        .map(str::to_string)
        .ok_or_else(|| AppError::ToolNotFound(selector.to_string()))
}

/// Execute the toggle command.
///
/// Enabling switches on every reachable dependency and persists after each
/// one, then persists the toggle itself. Disabling persists once.
pub fn execute<S, C, D>(
    ctx: &AppContext<S, C, D>,
    config: &mut Config,
    tool: &str,
) -> Result<ToggleOutcome, AppError>
where
    S: ConfigStore,
    C: SetupCache,
    D: SetupDownloader,
{
    let was_enabled = match config.tools.get(tool) {
        Some(entry) => entry.enable,
        None => return Err(AppError::ToolNotFound(tool.to_string())),
    };

    if was_enabled {
        disable(ctx, config, tool)
    } else {
        enable(ctx, config, tool)
    }
}

fn enable<S, C, D>(
    ctx: &AppContext<S, C, D>,
    config: &mut Config,
    tool: &str,
) -> Result<ToggleOutcome, AppError>
where
    S: ConfigStore,
    C: SetupCache,
    D: SetupDownloader,
{
    let plan = DependencyGraph::new(&config.tools).enable_plan(tool);

    let mut auto_enabled = Vec::new();
    let mut already_enabled = Vec::new();
    for dep in plan.dependencies {
        let Some(entry) = config.tools.get_mut(&dep) else {
            continue;
        };
        if entry.enable {
            already_enabled.push(dep);
            continue;
        }
        entry.enable = true;
        ctx.store().save(config)?;
        tracing::info!(tool, dependency = %dep, "auto-enabled dependency");
        auto_enabled.push(dep);
    }

    if let Some(entry) = config.tools.get_mut(tool) {
        entry.enable = true;
    }
    ctx.store().save(config)?;
    tracing::info!(tool, "enabled");

    Ok(ToggleOutcome::Enabled {
        tool: tool.to_string(),
        auto_enabled,
        already_enabled,
        unknown: plan.unknown,
    })
}

fn disable<S, C, D>(
    ctx: &AppContext<S, C, D>,
    config: &mut Config,
    tool: &str,
) -> Result<ToggleOutcome, AppError>
where
    S: ConfigStore,
    C: SetupCache,
    D: SetupDownloader,
{
    if let Some(entry) = config.tools.get_mut(tool) {
        entry.enable = false;
    }
    let dependents = DependencyGraph::new(&config.tools).dependents(tool);
    if !dependents.is_empty() {
        tracing::warn!(tool, dependents = %dependents.join(", "), "disabled tool is still required");
    }
    ctx.store().save(config)?;
    tracing::info!(tool, "disabled");

    Ok(ToggleOutcome::Disabled { tool: tool.to_string(), dependents })
}
