//! Compact tool registry: extraction, building, and discovery queries

pub mod builder;
pub mod descriptor;
pub mod extractor;
pub mod query;
pub mod types;

pub use builder::{BuildReport, Diagnostic, RegistryBuilder};
pub use descriptor::DescriptorDocument;
pub use query::{
    QueryEngine, RegistryStats, ServerSummary, ToolDetail, ToolHit, ToolSummary,
};
pub use types::{ParamInfo, Registry, ServerEntry, ToolRecord};
