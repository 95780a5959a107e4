//! Registry builder: one pass over a descriptor store into one artifact
//!
//! Per-server extraction has no cross-server dependency, so documents are
//! extracted in parallel and merged into the server map by key afterwards
//! (server names are unique, so the merge is order-independent). Publishing
//! writes a temporary file next to the target and renames it into place, so
//! concurrent readers never observe a partially-written registry.

use crate::error::{RegistryError, Result};
use crate::registry::extractor;
use crate::registry::types::{Registry, ServerEntry};
use chrono::Utc;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// One skipped descriptor document and the reason it was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Server the document was supposed to describe
    pub server: String,
    /// Why it was excluded from the registry
    pub reason: String,
}

/// Result of one builder run: the registry plus per-document diagnostics.
///
/// Diagnostics are reported, never persisted into the artifact.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub registry: Registry,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds a compact registry from a directory of descriptor documents
pub struct RegistryBuilder {
    servers_dir: PathBuf,
    output: Option<PathBuf>,
}

impl RegistryBuilder {
    /// Create a builder over the given descriptor store
    pub fn new<P: Into<PathBuf>>(servers_dir: P) -> Self {
        Self {
            servers_dir: servers_dir.into(),
            output: None,
        }
    }

    /// Set the artifact path used by [`RegistryBuilder::build_and_publish`]
    pub fn with_output<P: Into<PathBuf>>(mut self, output: P) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Scan the store and derive a registry without publishing it.
    ///
    /// Documents that cannot be read or parsed are skipped and reported as
    /// diagnostics. Zero usable documents is [`RegistryError::NoInput`]:
    /// the build fails and any previously published artifact is untouched.
    pub fn build(&self) -> Result<BuildReport> {
        let files = self.discover_documents()?;
        info!(
            "Building registry from {} descriptor documents in {}",
            files.len(),
            self.servers_dir.display()
        );

        let outcomes: Vec<(String, std::result::Result<ServerEntry, Diagnostic>)> = files
            .par_iter()
            .map(|path| extract_server(path))
            .collect();

        let mut servers = BTreeMap::new();
        let mut diagnostics = Vec::new();
        for (name, outcome) in outcomes {
            match outcome {
                Ok(entry) => {
                    debug!("Indexed server '{}' ({} tools)", name, entry.tool_count);
                    servers.insert(name, entry);
                }
                Err(diagnostic) => {
                    warn!(
                        "Skipping server '{}': {}",
                        diagnostic.server, diagnostic.reason
                    );
                    diagnostics.push(diagnostic);
                }
            }
        }

        if servers.is_empty() {
            return Err(RegistryError::no_input(
                self.servers_dir.display().to_string(),
            ));
        }

        let registry = Registry {
            generated_at: Utc::now(),
            servers_dir: self.servers_dir.display().to_string(),
            servers,
        };
        registry.validate()?;

        info!(
            "Registry built: {} servers, {} tools, {} skipped",
            registry.server_count(),
            registry.tool_count(),
            diagnostics.len()
        );
        Ok(BuildReport {
            registry,
            diagnostics,
        })
    }

    /// Build and atomically publish to the configured output path
    pub fn build_and_publish(&self) -> Result<BuildReport> {
        let output = self.output.as_ref().ok_or_else(|| {
            RegistryError::config("No output path configured for publishing")
        })?;

        let report = self.build()?;
        publish(&report.registry, output)?;
        Ok(report)
    }

    /// List the descriptor documents in the store, one `*.json` per server
    fn discover_documents(&self) -> Result<Vec<PathBuf>> {
        if !self.servers_dir.is_dir() {
            return Err(RegistryError::no_input(
                self.servers_dir.display().to_string(),
            ));
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.servers_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().map(|ext| ext == "json").unwrap_or(false))
            .collect();

        files.sort();
        Ok(files)
    }
}

/// Extract one server entry from one descriptor document on disk
fn extract_server(path: &Path) -> (String, std::result::Result<ServerEntry, Diagnostic>) {
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let spec_file = path
        .file_name()
        .map(|file| file.to_string_lossy().into_owned())
        .unwrap_or_default();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            return (
                name.clone(),
                Err(Diagnostic {
                    server: name,
                    reason: format!("Unreadable descriptor document: {}", e),
                }),
            );
        }
    };

    match extractor::extract(&name, &content) {
        Ok(tools) => {
            let entry = ServerEntry {
                spec_file,
                spec_size: content.len() as u64,
                tool_count: tools.len(),
                tools,
            };
            (name, Ok(entry))
        }
        Err(RegistryError::InvalidInputDocument { reason, .. }) => (
            name.clone(),
            Err(Diagnostic {
                server: name,
                reason,
            }),
        ),
        Err(e) => (
            name.clone(),
            Err(Diagnostic {
                server: name,
                reason: e.to_string(),
            }),
        ),
    }
}

/// Atomically publish a registry artifact.
///
/// The serialized registry is written to a temporary file in the target's
/// directory and renamed over the destination in one step.
pub fn publish(registry: &Registry, output: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(registry)?;

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let file_name = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "registry.json".to_string());
    let tmp = dir.join(format!(".{}.{}.tmp", file_name, std::process::id()));

    fs::write(&tmp, json)?;
    if let Err(e) = fs::rename(&tmp, output) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    info!("Published registry to {}", output.display());
    Ok(())
}
