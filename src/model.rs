//! Page records as decoded from the Logseq API and read back from the store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form page properties. Key order is irrelevant; array values keep
/// their order.
pub type Properties = Map<String, Value>;

/// Property key holding a page's tags.
pub const TAGS_PROPERTY: &str = "tags";

/// A Logseq page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: i64,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    pub uuid: String,
    #[serde(rename = "journal?", default)]
    pub journal: bool,
    pub original_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    /// Space-joined tags, filled in by queries only.
    #[serde(skip)]
    pub tags: String,
}

impl Page {
    /// Tags declared in the `tags` property, stringified, in declaration order.
    ///
    /// Absent properties, an absent `tags` key, or a non-array value all
    /// yield no tags.
    #[must_use]
    pub fn tag_values(&self) -> Vec<String> {
        self.properties
            .as_ref()
            .map(extract_tags)
            .unwrap_or_default()
    }
}

/// Extract the stringified elements of the `tags` array in `properties`.
#[must_use]
pub fn extract_tags(properties: &Properties) -> Vec<String> {
    match properties.get(TAGS_PROPERTY) {
        Some(Value::Array(values)) => values.iter().map(stringify_tag).collect(),
        _ => Vec::new(),
    }
}

/// Textual form of a tag value: strings verbatim, everything else as JSON.
#[must_use]
pub fn stringify_tag(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
