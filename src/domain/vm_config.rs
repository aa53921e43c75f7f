//! Virtual machine settings (`vmConfig`) of the configuration document.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::domain::AppError;

/// Memory used when `MemoryInMB` cannot be interpreted.
pub const DEFAULT_MEMORY_MB: u64 = 4096;

/// Logon command executed by the sandbox; points at the generated launcher.
pub const CANONICAL_LOGON_COMMAND: &str = r"C:\Users\WDAGUtilityAccount\Desktop\scripts\start.cmd";

/// Sandbox-side target for mapped folders that do not name one.
pub const DEFAULT_SANDBOX_FOLDER: &str = r"C:\Users\WDAGUtilityAccount\Desktop\sandbox-auto-setup";

/// `HostFolder` value standing for the local setup cache directory.
pub const DEFAULT_HOST_FOLDER: &str = "Default";

/// Scalar setting holding whatever JSON scalar the user stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Setting(Value);

impl Setting {
    /// Interpret a typed value: booleans and integers keep their type.
    pub fn parse_input(input: &str) -> Self {
        let trimmed = input.trim();
        if let Ok(flag) = trimmed.parse::<bool>() {
            return Setting(Value::Bool(flag));
        }
        if let Ok(number) = trimmed.parse::<i64>() {
            return Setting(Value::from(number));
        }
        Setting(Value::String(trimmed.to_string()))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Setting(Value::String(value.into()))
    }

    pub fn flag(value: bool) -> Self {
        Setting(Value::Bool(value))
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

/// `MemoryInMB` as stored: a number of megabytes or a string such as `"4GB"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemorySetting(Value);

impl MemorySetting {
    pub fn megabytes(value: u64) -> Self {
        MemorySetting(Value::from(value))
    }

    pub fn parse_input(input: &str) -> Self {
        match input.trim().parse::<u64>() {
            Ok(mb) => MemorySetting::megabytes(mb),
            Err(_) => MemorySetting(Value::String(input.trim().to_string())),
        }
    }

    /// Normalize to whole megabytes, falling back to [`DEFAULT_MEMORY_MB`].
    pub fn to_megabytes(&self) -> u64 {
        match &self.0 {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
                .unwrap_or(DEFAULT_MEMORY_MB),
            Value::String(s) => parse_memory_string(s).unwrap_or_else(|| {
                tracing::debug!(value = %s, "MemoryInMB not understood, using default");
                DEFAULT_MEMORY_MB
            }),
            _ => DEFAULT_MEMORY_MB,
        }
    }
}

impl fmt::Display for MemorySetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

fn parse_memory_string(raw: &str) -> Option<u64> {
    let upper = raw.to_ascii_uppercase();
    let digits = || raw.chars().filter(char::is_ascii_digit).collect::<String>().parse::<u64>();

    if upper.contains("GB") {
        digits().ok().and_then(|gb| gb.checked_mul(1024))
    } else if upper.contains("MB") {
        digits().ok()
    } else {
        raw.trim().parse::<u64>().ok()
    }
}

/// Host-to-sandbox directory binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedFolder {
    #[serde(rename = "HostFolder", default)]
    pub host_folder: String,
    #[serde(rename = "SandboxFolder", default = "default_sandbox_folder")]
    pub sandbox_folder: String,
    #[serde(rename = "ReadOnly", default = "default_read_only", deserialize_with = "lenient_bool")]
    pub read_only: bool,
}

impl MappedFolder {
    pub fn new(host_folder: impl Into<String>) -> Self {
        Self {
            host_folder: host_folder.into(),
            sandbox_folder: default_sandbox_folder(),
            read_only: default_read_only(),
        }
    }

    /// Whether the host side points at the local setup cache.
    pub fn uses_default_host(&self) -> bool {
        self.host_folder == DEFAULT_HOST_FOLDER
    }
}

fn default_sandbox_folder() -> String {
    DEFAULT_SANDBOX_FOLDER.to_string()
}

fn default_read_only() -> bool {
    true
}

/// Accept booleans and bool-like strings; anything else reads as read-only.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(flag) => flag,
        Value::String(s) => !matches!(s.trim().to_ascii_lowercase().as_str(), "false" | "no" | "0"),
        Value::Number(n) => n.as_i64() != Some(0),
        _ => true,
    })
}

/// Windows Sandbox parameters.
///
/// Unknown keys are kept in `extra` so they survive a load/save cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VmConfig {
    #[serde(rename = "vGPU", default, skip_serializing_if = "Option::is_none")]
    pub vgpu: Option<Setting>,
    #[serde(rename = "Networking", default, skip_serializing_if = "Option::is_none")]
    pub networking: Option<Setting>,
    #[serde(rename = "MemoryInMB", default, skip_serializing_if = "Option::is_none")]
    pub memory_in_mb: Option<MemorySetting>,
    #[serde(rename = "LogonCommand", default, skip_serializing_if = "Option::is_none")]
    pub logon_command: Option<String>,
    #[serde(rename = "MappedFolder", default, skip_serializing_if = "Vec::is_empty")]
    pub mapped_folders: Vec<MappedFolder>,
    #[serde(rename = "AudioInput", default, skip_serializing_if = "Option::is_none")]
    pub audio_input: Option<Setting>,
    #[serde(rename = "VideoInput", default, skip_serializing_if = "Option::is_none")]
    pub video_input: Option<Setting>,
    #[serde(rename = "PrinterRedirection", default, skip_serializing_if = "Option::is_none")]
    pub printer_redirection: Option<Setting>,
    #[serde(rename = "ProtectedClient", default, skip_serializing_if = "Option::is_none")]
    pub protected_client: Option<Setting>,
    #[serde(rename = "ClipboardRedirection", default, skip_serializing_if = "Option::is_none")]
    pub clipboard_redirection: Option<Setting>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VmConfig {
    /// Feature flags in descriptor order, with their element names.
    pub fn feature_flags(&self) -> [(&'static str, Option<&Setting>); 5] {
        [
            ("AudioInput", self.audio_input.as_ref()),
            ("VideoInput", self.video_input.as_ref()),
            ("PrinterRedirection", self.printer_redirection.as_ref()),
            ("ProtectedClient", self.protected_client.as_ref()),
            ("ClipboardRedirection", self.clipboard_redirection.as_ref()),
        ]
    }

    fn flag_slot(&mut self, key: &str) -> Option<&mut Option<Setting>> {
        match key {
            "vGPU" => Some(&mut self.vgpu),
            "Networking" => Some(&mut self.networking),
            "AudioInput" => Some(&mut self.audio_input),
            "VideoInput" => Some(&mut self.video_input),
            "PrinterRedirection" => Some(&mut self.printer_redirection),
            "ProtectedClient" => Some(&mut self.protected_client),
            "ClipboardRedirection" => Some(&mut self.clipboard_redirection),
            _ => None,
        }
    }

    /// Present scalar keys with their display values.
    ///
    /// Known keys come first in descriptor order (`vGPU`, `Networking`,
    /// `MemoryInMB`, `LogonCommand`, then the feature flags), followed by
    /// unknown keys. `MappedFolder` is excluded. Saving writes the known keys
    /// in this same order.
    pub fn scalar_entries(&self) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                entries.push((key.to_string(), value));
            }
        };
        push("vGPU", self.vgpu.as_ref().map(ToString::to_string));
        push("Networking", self.networking.as_ref().map(ToString::to_string));
        push("MemoryInMB", self.memory_in_mb.as_ref().map(ToString::to_string));
        push("LogonCommand", self.logon_command.clone());
        for (key, value) in self.feature_flags() {
            push(key, value.map(ToString::to_string));
        }
        for (key, value) in &self.extra {
            let display = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            entries.push((key.clone(), display));
        }
        entries
    }

    /// Set a field by its document key.
    ///
    /// Unknown keys are stored verbatim so they round-trip.
    pub fn set_field(&mut self, key: &str, input: &str) -> Result<(), AppError> {
        match key {
            "MappedFolder" => Err(AppError::invalid_input(
                "MappedFolder is edited with add-folder / remove-folder",
            )),
            "MemoryInMB" => {
                self.memory_in_mb = Some(MemorySetting::parse_input(input));
                Ok(())
            }
            "LogonCommand" => {
                self.logon_command = Some(input.trim().to_string());
                Ok(())
            }
            _ => {
                if let Some(slot) = self.flag_slot(key) {
                    *slot = Some(Setting::parse_input(input));
                } else if key.trim().is_empty() {
                    return Err(AppError::invalid_input("VM setting key must not be empty"));
                } else {
                    self.extra.insert(key.to_string(), Value::String(input.trim().to_string()));
                }
                Ok(())
            }
        }
    }

    pub fn add_mapped_folder(&mut self, folder: MappedFolder) {
        self.mapped_folders.push(folder);
    }

    /// Remove a mapped folder by 1-based index.
    pub fn remove_mapped_folder(&mut self, index: usize) -> Result<MappedFolder, AppError> {
        if index == 0 || index > self.mapped_folders.len() {
            return Err(AppError::invalid_input(format!(
                "mapped folder index {} out of range (1-{})",
                index,
                self.mapped_folders.len()
            )));
        }
        Ok(self.mapped_folders.remove(index - 1))
    }

    /// Point `LogonCommand` at the generated launcher. Returns whether it changed.
    pub fn ensure_logon_command(&mut self) -> bool {
        if self.logon_command.as_deref() == Some(CANONICAL_LOGON_COMMAND) {
            return false;
        }
        self.logon_command = Some(CANONICAL_LOGON_COMMAND.to_string());
        true
    }
}
