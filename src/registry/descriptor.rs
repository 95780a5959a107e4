//! Descriptor document parse-boundary types
//!
//! Strongly-typed optional-field mirror of the per-server descriptor
//! documents found in the descriptor store. Parsing happens once, here;
//! defaulting of absent fields happens once, in the extractor. Unknown
//! fields are ignored.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Media type key whose schema reference identifies a tool's parameters
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Root of one per-server descriptor document
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DescriptorDocument {
    /// Operation paths keyed by endpoint path (the tool identity)
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
    /// Reusable schema definitions
    #[serde(default)]
    pub components: Components,
}

/// One path entry. Only the POST operation maps to a tool.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PathItem {
    pub post: Option<PostOperation>,
}

/// The POST operation of one path
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PostOperation {
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBody>,
}

/// Request body of a POST operation
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RequestBody {
    #[serde(default)]
    pub content: HashMap<String, MediaType>,
}

/// One media type entry of a request body
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MediaType {
    pub schema: Option<SchemaRef>,
}

/// A schema reference slot, e.g. `{"$ref": "#/components/schemas/GitStatus"}`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SchemaRef {
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
}

/// The `components` section of a descriptor document
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Components {
    #[serde(default)]
    pub schemas: BTreeMap<String, SchemaObject>,
}

/// One named parameter schema
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SchemaObject {
    /// Parameter properties keyed by parameter name
    #[serde(default)]
    pub properties: BTreeMap<String, PropertySpec>,
    /// Required parameter names, in declared order
    #[serde(default)]
    pub required: Vec<String>,
}

/// Type and title metadata of one schema property
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PropertySpec {
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub title: Option<String>,
}

impl DescriptorDocument {
    /// Parse a descriptor document from raw JSON text
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Resolve a request schema reference against `components.schemas`.
    ///
    /// The namespace prefix (everything up to and including the final `/`)
    /// is stripped, so both `#/components/schemas/GitStatus` and a bare
    /// `GitStatus` resolve. An empty or unknown schema name resolves to
    /// `None`; callers treat that as "no schema", not as an error.
    pub fn resolve_schema(&self, reference: &str) -> Option<&SchemaObject> {
        let name = reference.rsplit('/').next().unwrap_or(reference);
        if name.is_empty() {
            return None;
        }
        self.components.schemas.get(name)
    }
}

impl PostOperation {
    /// The `$ref` of the `application/json` request schema, if declared
    pub fn request_schema_ref(&self) -> Option<&str> {
        self.request_body
            .as_ref()?
            .content
            .get(JSON_MEDIA_TYPE)?
            .schema
            .as_ref()?
            .reference
            .as_deref()
    }
}
