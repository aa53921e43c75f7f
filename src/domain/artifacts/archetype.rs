//! Installer archetypes: named install recipes for the generated script.

use serde::{Deserialize, Serialize};

use crate::domain::ToolEntry;

/// Install recipe selected for a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallerArchetype {
    /// Portable image viewer unpacked with 7-Zip and associated with images.
    ImageViewer,
    /// Inno Setup based version-control client.
    VersionControl,
    Python3,
    Python2,
    /// Python package installed through pip.
    StaticAnalysis,
    Editor,
    Sdk,
    /// Archive of diagnostics utilities.
    Diagnostics,
    /// Archive with a bootstrap script that downloads the actual toolkit.
    Forensics,
}

impl InstallerArchetype {
    pub const ALL: [InstallerArchetype; 9] = [
        InstallerArchetype::ImageViewer,
        InstallerArchetype::VersionControl,
        InstallerArchetype::Python3,
        InstallerArchetype::Python2,
        InstallerArchetype::StaticAnalysis,
        InstallerArchetype::Editor,
        InstallerArchetype::Sdk,
        InstallerArchetype::Diagnostics,
        InstallerArchetype::Forensics,
    ];

    /// Embedded template rendering this archetype's command block.
    pub fn template_name(&self) -> &'static str {
        match self {
            InstallerArchetype::ImageViewer => "archetypes/image_viewer.cmd.j2",
            InstallerArchetype::VersionControl => "archetypes/version_control.cmd.j2",
            InstallerArchetype::Python3 => "archetypes/python3.cmd.j2",
            InstallerArchetype::Python2 => "archetypes/python2.cmd.j2",
            InstallerArchetype::StaticAnalysis => "archetypes/static_analysis.cmd.j2",
            InstallerArchetype::Editor => "archetypes/editor.cmd.j2",
            InstallerArchetype::Sdk => "archetypes/sdk.cmd.j2",
            InstallerArchetype::Diagnostics => "archetypes/diagnostics.cmd.j2",
            InstallerArchetype::Forensics => "archetypes/forensics.cmd.j2",
        }
    }
}

/// Which name a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchField {
    /// Installer filename (`ToolEntry::name`).
    FileName,
    /// Catalog key of the tool.
    ToolName,
}

/// Case-insensitive substring rule inferring an archetype from names.
#[derive(Debug, Clone, Copy)]
struct ArchetypeRule {
    archetype: InstallerArchetype,
    field: MatchField,
    needle: &'static str,
}

impl ArchetypeRule {
    const fn file(archetype: InstallerArchetype, needle: &'static str) -> Self {
        Self { archetype, field: MatchField::FileName, needle }
    }

    const fn tool(archetype: InstallerArchetype, needle: &'static str) -> Self {
        Self { archetype, field: MatchField::ToolName, needle }
    }

    fn matches(&self, tool: &str, entry: &ToolEntry) -> bool {
        let haystack = match self.field {
            MatchField::FileName => entry.name.to_lowercase(),
            MatchField::ToolName => tool.to_lowercase(),
        };
        haystack.contains(self.needle)
    }
}

/// Rules in emission order. A tool may match several.
const RULES: [ArchetypeRule; 9] = [
    ArchetypeRule::file(InstallerArchetype::ImageViewer, "jpegview"),
    ArchetypeRule::file(InstallerArchetype::VersionControl, "git"),
    ArchetypeRule::file(InstallerArchetype::Python3, "python-3"),
    ArchetypeRule::file(InstallerArchetype::Python2, "python-2"),
    ArchetypeRule::tool(InstallerArchetype::StaticAnalysis, "oletools"),
    ArchetypeRule::file(InstallerArchetype::Editor, "vscode"),
    ArchetypeRule::file(InstallerArchetype::Sdk, "dotnet-sdk"),
    ArchetypeRule::file(InstallerArchetype::Diagnostics, "sysinternals"),
    ArchetypeRule::file(InstallerArchetype::Forensics, "zimmermantools"),
];

/// Archetypes whose command blocks install `tool`.
///
/// An explicit tag wins; otherwise every matching rule contributes. An empty
/// result means the tool needs no install commands.
pub fn archetypes_for(tool: &str, entry: &ToolEntry) -> Vec<InstallerArchetype> {
    if let Some(archetype) = entry.archetype {
        return vec![archetype];
    }
    RULES.iter().filter(|rule| rule.matches(tool, entry)).map(|rule| rule.archetype).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> ToolEntry {
        ToolEntry { name: name.into(), ..ToolEntry::default() }
    }

    #[test]
    fn matches_filenames_case_insensitively() {
        assert_eq!(
            archetypes_for("jpegview", &file("JPEGView_1.3.46.7z")),
            vec![InstallerArchetype::ImageViewer]
        );
        assert_eq!(
            archetypes_for("python3", &file("python-3.12.4-amd64.exe")),
            vec![InstallerArchetype::Python3]
        );
        assert_eq!(
            archetypes_for("sysinternals", &file("SysinternalsSuite.zip")),
            vec![InstallerArchetype::Diagnostics]
        );
        assert_eq!(
            archetypes_for("eztools", &file("Get-ZimmermanTools.zip")),
            vec![InstallerArchetype::Forensics]
        );
    }

    #[test]
    fn static_analysis_matches_on_tool_name() {
        assert_eq!(
            archetypes_for("oletools", &file("none")),
            vec![InstallerArchetype::StaticAnalysis]
        );
        assert!(archetypes_for("other", &file("oletools.zip")).is_empty());
    }

    #[test]
    fn explicit_tag_overrides_sniffing() {
        let entry = ToolEntry {
            name: "git-portable.zip".into(),
            archetype: Some(InstallerArchetype::Diagnostics),
            ..ToolEntry::default()
        };
        assert_eq!(archetypes_for("git", &entry), vec![InstallerArchetype::Diagnostics]);
    }

    #[test]
    fn unmatched_tool_has_no_archetype() {
        assert!(archetypes_for("wireshark", &file("Wireshark-4.2.5-x64.exe")).is_empty());
    }

    #[test]
    fn several_rules_can_match() {
        let found = archetypes_for("combo", &file("vscode-with-git.exe"));
        assert_eq!(found, vec![InstallerArchetype::VersionControl, InstallerArchetype::Editor]);
    }

    #[test]
    fn tag_serializes_kebab_case() {
        let json = serde_json::to_string(&InstallerArchetype::StaticAnalysis).unwrap();
        assert_eq!(json, r#""static-analysis""#);
        let parsed: InstallerArchetype = serde_json::from_str(r#""python3""#).unwrap();
        assert_eq!(parsed, InstallerArchetype::Python3);
    }
}
