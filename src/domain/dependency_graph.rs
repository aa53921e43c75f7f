//! Dependency graph over the tool catalog.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{ToolCatalog, ToolEntry};

/// How enabled tools are ordered in the install script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallOrder {
    /// Ascending number of direct dependencies, catalog order on ties.
    #[default]
    DependencyCount,
    /// Dependencies strictly before dependents (Kahn's algorithm).
    Topological,
}

/// Dependencies to switch on when a tool is enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnablePlan {
    /// Known tools reachable from the target, in depth-first discovery order.
    pub dependencies: Vec<String>,
    /// Referenced names missing from the catalog.
    pub unknown: Vec<String>,
}

/// Read-only view of the dependency edges in a catalog.
pub struct DependencyGraph<'a> {
    catalog: &'a ToolCatalog,
}

impl<'a> DependencyGraph<'a> {
    pub fn new(catalog: &'a ToolCatalog) -> Self {
        Self { catalog }
    }

    /// Every known tool reachable from `tool` through `dependencies` edges.
    ///
    /// The tool itself is included only when it sits on a cycle. Unknown tools
    /// have no dependencies.
    pub fn transitive_dependencies(&self, tool: &str) -> BTreeSet<String> {
        let mut visited = BTreeSet::new();
        let mut order = Vec::new();
        let mut unknown = Vec::new();
        if let Some(root) = self.key(tool) {
            self.walk(root, &mut visited, &mut order, &mut unknown);
        }
        order.into_iter().map(str::to_string).collect()
    }

    /// Dependencies that enabling `tool` switches on, excluding `tool` itself.
    pub fn enable_plan(&self, tool: &str) -> EnablePlan {
        let mut visited = BTreeSet::new();
        let mut order = Vec::new();
        let mut unknown = Vec::new();
        if let Some(root) = self.key(tool) {
            self.walk(root, &mut visited, &mut order, &mut unknown);
        }
        EnablePlan {
            dependencies: order.into_iter().filter(|dep| *dep != tool).map(str::to_string).collect(),
            unknown: unknown.into_iter().map(str::to_string).collect(),
        }
    }

    fn key(&self, tool: &str) -> Option<&'a str> {
        self.catalog.keys().find(|key| *key == tool)
    }

    /// Depth-first walk; `visited` terminates cycles.
    fn walk(
        &self,
        tool: &'a str,
        visited: &mut BTreeSet<&'a str>,
        order: &mut Vec<&'a str>,
        unknown: &mut Vec<&'a str>,
    ) {
        let Some(entry) = self.catalog.get(tool) else {
            return;
        };

        for dep in &entry.dependencies {
            let dep = dep.as_str();
            if !self.catalog.contains(dep) {
                if !unknown.contains(&dep) {
                    tracing::warn!(tool, dependency = dep, "dependency not found in catalog");
                    unknown.push(dep);
                }
                continue;
            }
            if visited.insert(dep) {
                order.push(dep);
                self.walk(dep, visited, order, unknown);
            }
        }
    }

    /// Enabled tools that list `tool` as a direct dependency.
    pub fn dependents(&self, tool: &str) -> Vec<String> {
        self.catalog
            .enabled()
            .filter(|(name, entry)| *name != tool && entry.dependencies.iter().any(|d| d == tool))
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Enabled tools in install order.
    pub fn install_order(&self, strategy: InstallOrder) -> Vec<(&'a str, &'a ToolEntry)> {
        let mut enabled: Vec<(&'a str, &'a ToolEntry)> = self.catalog.enabled().collect();
        match strategy {
            InstallOrder::DependencyCount => {
                enabled.sort_by_key(|(_, entry)| entry.dependencies.len());
                enabled
            }
            InstallOrder::Topological => Self::topological(enabled),
        }
    }

    fn topological(enabled: Vec<(&'a str, &'a ToolEntry)>) -> Vec<(&'a str, &'a ToolEntry)> {
        let index: BTreeMap<&str, usize> =
            enabled.iter().enumerate().map(|(i, (name, _))| (*name, i)).collect();

        // Edge dep -> dependent; only edges between enabled tools count.
        let mut in_degree = vec![0usize; enabled.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); enabled.len()];
        for (i, (_, entry)) in enabled.iter().enumerate() {
            let deps: BTreeSet<usize> =
                entry.dependencies.iter().filter_map(|d| index.get(d.as_str()).copied()).collect();
            for dep in deps {
                in_degree[i] += 1;
                dependents[dep].push(i);
            }
        }

        // Smallest catalog position first keeps the output deterministic.
        let mut ready: BTreeSet<usize> =
            in_degree.iter().enumerate().filter(|(_, d)| **d == 0).map(|(i, _)| i).collect();
        let mut placed = vec![false; enabled.len()];
        let mut result = Vec::with_capacity(enabled.len());

        while let Some(current) = ready.pop_first() {
            placed[current] = true;
            result.push(enabled[current]);
            for &dependent in &dependents[current] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.insert(dependent);
                }
            }
        }

        if result.len() != enabled.len() {
            let cyclic: Vec<&str> = enabled
                .iter()
                .zip(&placed)
                .filter(|(_, placed)| !**placed)
                .map(|((name, _), _)| *name)
                .collect();
            tracing::warn!(tools = %cyclic.join(", "), "dependency cycle, keeping catalog order");
            result.extend(enabled.iter().zip(&placed).filter(|(_, p)| !**p).map(|(t, _)| *t));
        }

        result
    }
}
