//! Registry types and structures

use crate::error::{RegistryError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Bucket threshold for megabyte display
const MEGABYTE: u64 = 1_048_576;

/// Bucket threshold for kilobyte display
const KILOBYTE: u64 = 1024;

/// Type and title metadata for one tool parameter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParamInfo {
    /// Declared schema type, empty when the source declares none
    #[serde(rename = "type", default)]
    pub param_type: String,
    /// Human-readable title, omitted when the source declares none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// One tool's discoverable metadata, keyed by tool name in [`ServerEntry`]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolRecord {
    /// One-line summary, empty when the source declares none
    #[serde(default)]
    pub summary: String,
    /// Long-form description, empty when the source declares none
    #[serde(default)]
    pub description: String,
    /// Raw request schema reference as written in the descriptor document
    #[serde(default)]
    pub schema_ref: String,
    /// Required parameter names in their declared order
    #[serde(default)]
    pub required_params: Vec<String>,
    /// Optional parameter names (schema properties minus required), sorted
    #[serde(default)]
    pub optional_params: Vec<String>,
    /// Per-parameter metadata keyed by parameter name
    #[serde(default)]
    pub params: BTreeMap<String, ParamInfo>,
}

impl ToolRecord {
    /// Validate the parameter-partition invariant: a name is never both
    /// required and optional, and every `params` key belongs to one side.
    pub fn validate(&self, name: &str) -> Result<()> {
        for param in &self.required_params {
            if self.optional_params.contains(param) {
                return Err(RegistryError::validation(format!(
                    "Tool '{}': parameter '{}' is both required and optional",
                    name, param
                )));
            }
        }

        for param in self.params.keys() {
            if !self.required_params.contains(param) && !self.optional_params.contains(param) {
                return Err(RegistryError::validation(format!(
                    "Tool '{}': parameter '{}' is neither required nor optional",
                    name, param
                )));
            }
        }

        Ok(())
    }
}

/// Index entry for one server's descriptor document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerEntry {
    /// File name of the originating descriptor document
    pub spec_file: String,
    /// Byte length of the descriptor document
    pub spec_size: u64,
    /// Number of extracted tools
    pub tool_count: usize,
    /// Tool records keyed by tool name
    #[serde(default)]
    pub tools: BTreeMap<String, ToolRecord>,
}

impl ServerEntry {
    /// Human-readable size bucket derived from `spec_size`
    pub fn size_display(&self) -> String {
        size_display(self.spec_size)
    }

    /// Validate internal consistency of this entry
    pub fn validate(&self, server: &str) -> Result<()> {
        if self.tool_count != self.tools.len() {
            return Err(RegistryError::validation(format!(
                "Server '{}': tool_count {} does not match {} stored tools",
                server,
                self.tool_count,
                self.tools.len()
            )));
        }

        for (name, tool) in &self.tools {
            tool.validate(name)?;
        }

        Ok(())
    }
}

/// Format a byte count into the fixed display buckets used by server
/// listings. Integer division truncates: 11000 bytes is "10K", not "11K".
pub fn size_display(size: u64) -> String {
    if size > MEGABYTE {
        format!("{}M", size / MEGABYTE)
    } else if size > KILOBYTE {
        format!("{}K", size / KILOBYTE)
    } else {
        format!("{}B", size)
    }
}

/// The compact, immutable index derived from all descriptor documents.
///
/// Produced wholesale by one builder run and replaced wholesale on rebuild;
/// never patched incrementally. Query operations treat a loaded value as
/// read-only, so any number of concurrent readers may share one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Registry {
    /// Wall-clock time of the build that produced this registry
    pub generated_at: DateTime<Utc>,
    /// Descriptor store the registry was derived from
    pub servers_dir: String,
    /// Server entries keyed by server name
    pub servers: BTreeMap<String, ServerEntry>,
}

impl Registry {
    /// Load a published registry artifact from disk.
    ///
    /// A missing, unreadable, or unparseable artifact maps to
    /// [`RegistryError::RegistryUnavailable`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            RegistryError::registry_unavailable(path.display().to_string(), e.to_string())
        })?;

        let registry: Registry = serde_json::from_str(&content).map_err(|e| {
            RegistryError::registry_unavailable(path.display().to_string(), e.to_string())
        })?;

        registry.validate().map_err(|e| {
            RegistryError::registry_unavailable(path.display().to_string(), e.to_string())
        })?;
        Ok(registry)
    }

    /// Number of servers in the registry
    pub fn server_count(&self) -> usize {
        self.servers.len()
    }

    /// Total number of tools across all servers
    pub fn tool_count(&self) -> usize {
        self.servers.values().map(|entry| entry.tool_count).sum()
    }

    /// Validate internal consistency of the whole registry
    pub fn validate(&self) -> Result<()> {
        for (server, entry) in &self.servers {
            if server.is_empty() {
                return Err(RegistryError::validation("Server name cannot be empty"));
            }
            entry.validate(server)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_display_buckets() {
        assert_eq!(size_display(0), "0B");
        assert_eq!(size_display(500), "500B");
        assert_eq!(size_display(1024), "1024B");
        assert_eq!(size_display(1025), "1K");
        assert_eq!(size_display(2048), "2K");
        assert_eq!(size_display(11000), "10K");
        assert_eq!(size_display(1_048_576), "1024K");
        assert_eq!(size_display(2_097_152), "2M");
    }

    #[test]
    fn test_tool_record_partition_invariant() {
        let mut record = ToolRecord {
            required_params: vec!["repo_path".to_string()],
            optional_params: vec!["verbose".to_string()],
            ..Default::default()
        };
        record.params.insert(
            "repo_path".to_string(),
            ParamInfo {
                param_type: "string".to_string(),
                title: None,
            },
        );
        record.params.insert(
            "verbose".to_string(),
            ParamInfo {
                param_type: "boolean".to_string(),
                title: None,
            },
        );
        assert!(record.validate("git_status").is_ok());

        record.optional_params.push("repo_path".to_string());
        assert!(record.validate("git_status").is_err());
    }

    #[test]
    fn test_tool_record_rejects_unclassified_param() {
        let mut record = ToolRecord::default();
        record.params.insert(
            "orphan".to_string(),
            ParamInfo {
                param_type: "string".to_string(),
                title: None,
            },
        );
        assert!(record.validate("broken").is_err());
    }

    #[test]
    fn test_server_entry_count_consistency() {
        let entry = ServerEntry {
            spec_file: "git.json".to_string(),
            spec_size: 100,
            tool_count: 2,
            tools: BTreeMap::new(),
        };
        assert!(entry.validate("git").is_err());
    }

    #[test]
    fn test_param_info_title_omitted_when_absent() {
        let info = ParamInfo {
            param_type: "string".to_string(),
            title: None,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(json, r#"{"type":"string"}"#);

        let info = ParamInfo {
            param_type: "string".to_string(),
            title: Some("Repo Path".to_string()),
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("Repo Path"));
    }
}
