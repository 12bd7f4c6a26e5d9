use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed category labels. Parameter findings use the raw payload tag instead.
pub mod labels {
    pub const POSITIVE_PROMPTS: &str = "Positive Prompts";
    pub const NEGATIVE_PROMPTS: &str = "Negative Prompts";
    pub const BASE_MODELS: &str = "Base Models";
    pub const LORA_MODELS: &str = "LoRA Models";
    pub const SOURCE_NODES: &str = "Source Nodes (No Parameters)";
}

/// Payload tag stamped on every resolved prompt.
pub const PROMPT_PAYLOAD: &str = "TEXT";

/// Description attached to findings in the source-node bucket.
pub const SOURCE_NODE_DESCRIPTION: &str = "Node with no incoming links and no explicit parameters.";

/// One piece of provenance attached to a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub node_id: String,
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The payload type that led to this finding.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub payload_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Finding {
    pub fn new(node_id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            node_type: node_type.into(),
            title: None,
            payload_type: None,
            value: None,
            description: None,
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn with_payload(mut self, payload_type: impl Into<String>) -> Self {
        self.payload_type = Some(payload_type.into());
        self
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Findings grouped by category, both in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryMap(IndexMap<String, Vec<Finding>>);

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, category: &str, finding: Finding) {
        self.entry(category).push(finding);
    }

    /// The findings list for `category`, created empty if absent.
    pub fn entry(&mut self, category: &str) -> &mut Vec<Finding> {
        self.0.entry(category.to_string()).or_default()
    }

    pub fn get(&self, category: &str) -> Option<&[Finding]> {
        self.0.get(category).map(Vec::as_slice)
    }

    /// Whether any category already records `node_id`.
    pub fn contains_node(&self, node_id: &str) -> bool {
        self.0
            .values()
            .flatten()
            .any(|finding| finding.node_id == node_id)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Finding])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

}

impl FromIterator<(String, Vec<Finding>)> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Finding>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for CategoryMap {
    type Item = (String, Vec<Finding>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<Finding>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
