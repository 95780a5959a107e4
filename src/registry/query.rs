//! Discovery queries over a loaded registry
//!
//! Every operation is a pure read over one immutable [`Registry`] value;
//! concurrent callers need no locking. Listings are sorted by key, which
//! falls out of the registry's ordered maps. Empty `find_by_name`/`search`
//! results are an answer, not an error.

use crate::error::{RegistryError, Result};
use crate::registry::types::{ParamInfo, Registry, ToolRecord};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// One server row in a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSummary {
    pub name: String,
    pub tool_count: usize,
    pub size_display: String,
}

/// One tool row in a per-server listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSummary {
    pub name: String,
    pub summary: String,
}

/// One match from `find_by_name` or `search`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolHit {
    pub server: String,
    pub tool: String,
    pub summary: String,
}

/// Full detail for one tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDetail {
    pub server: String,
    pub tool: String,
    /// Synthesized reference endpoint, `"{server}/{tool}"`
    pub endpoint: String,
    pub summary: String,
    pub description: String,
    /// Required parameter names in stored (declared) order
    pub required_params: Vec<String>,
    pub optional_params: Vec<String>,
    pub params: BTreeMap<String, ParamInfo>,
}

/// Aggregate statistics for one registry
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryStats {
    pub generated_at: DateTime<Utc>,
    pub server_count: usize,
    /// Sum of tool counts across servers
    pub tool_count: usize,
    /// Per-server tool counts sorted by server name
    pub per_server: Vec<(String, usize)>,
}

/// Case-insensitive substring predicate shared by every search surface.
///
/// A tool matches when the keyword occurs in its name, summary, or
/// description. Defined once so search semantics stay uniform and testable
/// in isolation.
pub fn keyword_matches(keyword: &str, name: &str, record: &ToolRecord) -> bool {
    let needle = keyword.to_lowercase();
    name.to_lowercase().contains(&needle)
        || record.summary.to_lowercase().contains(&needle)
        || record.description.to_lowercase().contains(&needle)
}

/// Stateless read operations over one loaded, immutable registry
pub struct QueryEngine<'a> {
    registry: &'a Registry,
}

impl<'a> QueryEngine<'a> {
    /// Create a query engine over a loaded registry
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// All servers sorted by name
    pub fn list_servers(&self) -> Vec<ServerSummary> {
        self.registry
            .servers
            .iter()
            .map(|(name, entry)| ServerSummary {
                name: name.clone(),
                tool_count: entry.tool_count,
                size_display: entry.size_display(),
            })
            .collect()
    }

    /// One server's tools sorted by name
    pub fn list_tools(&self, server: &str) -> Result<Vec<ToolSummary>> {
        let entry = self
            .registry
            .servers
            .get(server)
            .ok_or_else(|| RegistryError::server_not_found(server))?;

        Ok(entry
            .tools
            .iter()
            .map(|(name, record)| ToolSummary {
                name: name.clone(),
                summary: record.summary.clone(),
            })
            .collect())
    }

    /// Every server containing a tool with exactly this name.
    ///
    /// No match is an empty list, not an error.
    pub fn find_by_name(&self, tool: &str) -> Vec<ToolHit> {
        self.registry
            .servers
            .iter()
            .filter_map(|(server, entry)| {
                entry.tools.get(tool).map(|record| ToolHit {
                    server: server.clone(),
                    tool: tool.to_string(),
                    summary: record.summary.clone(),
                })
            })
            .collect()
    }

    /// Case-insensitive substring search over tool name, summary, and
    /// description across all servers.
    ///
    /// One hit per tool however many of its fields match; results come in
    /// server-then-tool order. No match is an empty list, not an error.
    pub fn search(&self, keyword: &str) -> Vec<ToolHit> {
        let mut hits = Vec::new();
        for (server, entry) in &self.registry.servers {
            for (name, record) in &entry.tools {
                if keyword_matches(keyword, name, record) {
                    hits.push(ToolHit {
                        server: server.clone(),
                        tool: name.clone(),
                        summary: record.summary.clone(),
                    });
                }
            }
        }
        hits
    }

    /// Full record for one tool, with the synthesized reference endpoint
    pub fn detail(&self, server: &str, tool: &str) -> Result<ToolDetail> {
        let entry = self
            .registry
            .servers
            .get(server)
            .ok_or_else(|| RegistryError::server_not_found(server))?;

        let record = entry
            .tools
            .get(tool)
            .ok_or_else(|| RegistryError::tool_not_found(server, tool))?;

        Ok(ToolDetail {
            server: server.to_string(),
            tool: tool.to_string(),
            endpoint: format!("{}/{}", server, tool),
            summary: record.summary.clone(),
            description: record.description.clone(),
            required_params: record.required_params.clone(),
            optional_params: record.optional_params.clone(),
            params: record.params.clone(),
        })
    }

    /// Aggregate counts for the loaded registry
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            generated_at: self.registry.generated_at,
            server_count: self.registry.server_count(),
            tool_count: self.registry.tool_count(),
            per_server: self
                .registry
                .servers
                .iter()
                .map(|(name, entry)| (name.clone(), entry.tool_count))
                .collect(),
        }
    }
}
