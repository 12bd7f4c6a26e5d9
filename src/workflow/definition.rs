use super::link::Link;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A declared input slot on a node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputSlot {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub slot_type: String,
}

/// A single operation in a workflow graph.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Node {
    /// Canonical string identifier, assigned by the loader.
    #[serde(skip)]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub node_type: String,
    #[serde(default, deserialize_with = "lenient_title")]
    pub title: Option<String>,
    /// `0` means enabled; anything else is muted or bypassed.
    #[serde(default, deserialize_with = "lenient_mode")]
    pub mode: i64,
    /// `None` when the record carries no `inputs` key at all.
    #[serde(default)]
    pub inputs: Option<Vec<InputSlot>>,
    #[serde(default, deserialize_with = "lenient_widgets")]
    pub widgets_values: Vec<Value>,
}

impl Node {
    pub fn is_enabled(&self) -> bool {
        self.mode == 0
    }

    pub fn has_widgets(&self) -> bool {
        !self.widgets_values.is_empty()
    }

    /// Name of the input slot at `index`, if the node declares one there.
    pub fn input_name(&self, index: usize) -> Option<&str> {
        self.inputs
            .as_ref()
            .and_then(|inputs| inputs.get(index))
            .map(|slot| slot.name.as_str())
    }

    /// The node type, or a placeholder when the record had none.
    pub fn display_type(&self) -> &str {
        if self.node_type.is_empty() {
            "Unknown Type"
        } else {
            &self.node_type
        }
    }
}

/// How the `nodes` collection arrived in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    /// A mapping keyed by node identifier.
    Keyed,
    /// A sequence of records each carrying an `id` field.
    Listed,
    /// No `nodes` key was present.
    Absent,
    /// `nodes` was present but neither a mapping nor a sequence.
    Unrecognized,
}

/// The canonical, read-only form of a workflow: nodes keyed by string id in
/// document order, plus the link list in document order.
#[derive(Debug, Clone)]
pub struct WorkflowGraph {
    pub(crate) nodes: IndexMap<String, Node>,
    pub(crate) links: Vec<Link>,
    pub(crate) node_shape: NodeShape,
}

impl WorkflowGraph {
    /// Builds a graph directly from already-canonical parts.
    pub fn new(nodes: impl IntoIterator<Item = Node>, links: Vec<Link>) -> Self {
        let nodes = nodes
            .into_iter()
            .map(|node| (node.id.clone(), node))
            .collect();
        Self {
            nodes,
            links,
            node_shape: NodeShape::Keyed,
        }
    }

    pub fn nodes(&self) -> &IndexMap<String, Node> {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_shape(&self) -> NodeShape {
        self.node_shape
    }
}

// Third-party workflows are loosely typed, so every field is read leniently.

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_title<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => Some(other.to_string()),
    })
}

fn lenient_mode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_widgets<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(values) => values,
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        Value::Null => Vec::new(),
        scalar => vec![scalar],
    })
}
