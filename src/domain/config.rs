//! Root configuration document (`config.json`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{AppError, ToolCatalog, VmConfig};

/// Tool catalog plus sandbox parameters, persisted as one JSON document.
///
/// Root keys other than `tools` and `vmConfig` are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub tools: ToolCatalog,
    #[serde(default)]
    pub vm_config: VmConfig,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Config {
    /// Parse a configuration document.
    pub fn parse_json(content: &str) -> Result<Self, AppError> {
        serde_json::from_str(content)
            .map_err(|e| AppError::ParseError { what: "config.json".into(), details: e.to_string() })
    }

    /// Render the document with four-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, AppError> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| AppError::Internal(format!("Failed to serialize config: {}", e)))?;
        String::from_utf8(buffer)
            .map_err(|e| AppError::Internal(format!("Serialized config is not UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "tools": {
            "python3": {"name": "python-3.12.4-amd64.exe", "version": "3.12.4",
                        "link": "https://example.com/py.exe", "enable": true, "dependencies": []},
            "oletools": {"name": "none", "version": "0.60", "link": "", "enable": false,
                         "dependencies": ["python3"]}
        },
        "vmConfig": {"MemoryInMB": "8GB", "Networking": "Enable"}
    }"#;

    #[test]
    fn parses_sample_document() {
        let config = Config::parse_json(SAMPLE).unwrap();
        assert_eq!(config.tools.len(), 2);
        assert_eq!(config.tools.get("oletools").unwrap().dependencies, vec!["python3"]);
        assert_eq!(config.vm_config.memory_in_mb.as_ref().unwrap().to_megabytes(), 8192);
    }

    #[test]
    fn pretty_output_uses_four_spaces_and_round_trips() {
        let config = Config::parse_json(SAMPLE).unwrap();
        let pretty = config.to_json_pretty().unwrap();
        assert!(pretty.contains("\n    \"tools\": {"));
        assert_eq!(Config::parse_json(&pretty).unwrap(), config);
    }

    #[test]
    fn save_keeps_unknown_keys_and_absent_fields() {
        let content = r#"{
            "tools": {"git": {"name": "git.exe", "description": "VCS", "enable": false}},
            "vmConfig": {"Networking": "Enable"},
            "meta": {"owner": "me"}
        }"#;
        let mut config = Config::parse_json(content).unwrap();
        config.tools.get_mut("git").unwrap().enable = true;

        let saved: Value = serde_json::from_str(&config.to_json_pretty().unwrap()).unwrap();
        assert_eq!(saved["meta"]["owner"], "me");
        assert_eq!(saved["tools"]["git"]["description"], "VCS");
        assert_eq!(saved["tools"]["git"]["enable"], true);
        let git = saved["tools"]["git"].as_object().unwrap();
        assert!(!git.contains_key("version"));
        assert!(!git.contains_key("link"));
        assert!(!git.contains_key("dependencies"));
    }

    #[test]
    fn malformed_document_is_parse_error() {
        let err = Config::parse_json("{ not json").unwrap_err();
        assert!(matches!(err, AppError::ParseError { what, .. } if what == "config.json"));
    }

    #[test]
    fn empty_document_defaults() {
        let config = Config::parse_json("{}").unwrap();
        assert!(config.tools.is_empty());
        assert_eq!(config.vm_config, VmConfig::default());
    }
}
