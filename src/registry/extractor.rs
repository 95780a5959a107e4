//! Tool extraction from descriptor documents
//!
//! Turns one per-server descriptor document into compact tool records.
//! All defaulting of absent fields happens here, once: summaries and
//! descriptions become empty strings, and an absent or unresolved schema
//! reference leaves all three parameter fields empty, never partially
//! populated.

use crate::error::{RegistryError, Result};
use crate::registry::descriptor::{DescriptorDocument, PostOperation, SchemaObject};
use crate::registry::types::{ParamInfo, ToolRecord};
use std::collections::BTreeMap;
use tracing::debug;

/// Extract the tool records for one server from raw descriptor JSON.
///
/// A document that fails to parse yields
/// [`RegistryError::InvalidInputDocument`]; the builder records it as a
/// diagnostic and skips the server, so one bad input never aborts a build.
pub fn extract(server: &str, content: &str) -> Result<BTreeMap<String, ToolRecord>> {
    let document = DescriptorDocument::from_json(content)
        .map_err(|e| RegistryError::invalid_document(server.to_string(), e.to_string()))?;

    let tools = extract_document(&document);
    debug!("Extracted {} tools for server '{}'", tools.len(), server);
    Ok(tools)
}

/// Extract tool records from an already-parsed descriptor document.
///
/// Tool names derive from operation paths with the leading separator
/// stripped. Paths without a POST operation are not tools and yield no
/// record.
pub fn extract_document(document: &DescriptorDocument) -> BTreeMap<String, ToolRecord> {
    let mut tools = BTreeMap::new();

    for (path, item) in &document.paths {
        let post = match &item.post {
            Some(post) => post,
            None => continue,
        };

        let name = path.trim_start_matches('/');
        if name.is_empty() {
            debug!("Skipping operation with empty tool name at path '{}'", path);
            continue;
        }

        tools.insert(name.to_string(), build_record(document, post));
    }

    tools
}

/// Build one tool record from its POST operation
fn build_record(document: &DescriptorDocument, post: &PostOperation) -> ToolRecord {
    let mut record = ToolRecord {
        summary: post.summary.clone().unwrap_or_default(),
        description: post.description.clone().unwrap_or_default(),
        schema_ref: post.request_schema_ref().unwrap_or_default().to_string(),
        ..Default::default()
    };

    if let Some(schema) = post
        .request_schema_ref()
        .and_then(|reference| document.resolve_schema(reference))
    {
        apply_schema(&mut record, schema);
    }

    record
}

/// Fill the three parameter fields from a resolved schema.
///
/// `required_params` keeps the schema's declared order. `optional_params`
/// is the property names minus the required set, sorted. Together they
/// partition the schema's properties.
fn apply_schema(record: &mut ToolRecord, schema: &SchemaObject) {
    record.required_params = schema.required.clone();

    record.optional_params = schema
        .properties
        .keys()
        .filter(|name| !schema.required.contains(name))
        .cloned()
        .collect();

    record.params = schema
        .properties
        .iter()
        .map(|(name, property)| {
            (
                name.clone(),
                ParamInfo {
                    param_type: property.property_type.clone().unwrap_or_default(),
                    title: property.title.clone(),
                },
            )
        })
        .collect();
}
