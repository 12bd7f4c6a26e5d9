use super::definition::{Node, NodeShape, WorkflowGraph};
use super::link::{Link, node_key};
use crate::error::LoadError;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Reads and parses a workflow JSON document from disk.
pub fn load_workflow_file(path: impl AsRef<Path>) -> Result<Value, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| LoadError::Json(e.to_string()))
}

/// The two accepted shapes of the `nodes` collection, resolved once at load.
enum NodeCollection<'a> {
    Keyed(&'a Map<String, Value>),
    Listed(&'a [Value]),
}

impl WorkflowGraph {
    /// Normalizes a raw workflow document into a `WorkflowGraph`.
    ///
    /// Only a non-object document is an error. Unreadable node or link records
    /// are skipped with a warning, and a `nodes` value of the wrong shape
    /// yields an empty node mapping tagged `NodeShape::Unrecognized`.
    pub fn from_value(document: &Value) -> Result<Self, LoadError> {
        let root = document.as_object().ok_or(LoadError::NotAnObject)?;

        let (collection, node_shape) = match root.get("nodes") {
            Some(Value::Object(map)) => (Some(NodeCollection::Keyed(map)), NodeShape::Keyed),
            Some(Value::Array(list)) => (Some(NodeCollection::Listed(list)), NodeShape::Listed),
            None => (None, NodeShape::Absent),
            Some(_) => {
                tracing::warn!("'nodes' is neither a mapping nor a list, ignoring it");
                (None, NodeShape::Unrecognized)
            }
        };

        let nodes = match collection {
            Some(collection) => normalize_nodes(collection),
            None => IndexMap::new(),
        };
        let links = match root.get("links") {
            Some(value) => normalize_links(value),
            None => Vec::new(),
        };

        tracing::debug!(
            nodes = nodes.len(),
            links = links.len(),
            shape = ?node_shape,
            "Loaded workflow graph"
        );

        Ok(Self {
            nodes,
            links,
            node_shape,
        })
    }
}

fn normalize_nodes(collection: NodeCollection<'_>) -> IndexMap<String, Node> {
    let mut nodes = IndexMap::new();
    match collection {
        NodeCollection::Keyed(map) => {
            for (key, record) in map {
                if let Some(node) = read_node(key.clone(), record) {
                    nodes.insert(key.clone(), node);
                }
            }
        }
        NodeCollection::Listed(list) => {
            for record in list {
                let Some(id) = record.get("id").and_then(node_key) else {
                    tracing::warn!(record = %record, "Node record has no usable 'id' field, skipping");
                    continue;
                };
                if let Some(node) = read_node(id.clone(), record) {
                    nodes.insert(id, node);
                }
            }
        }
    }
    nodes
}

fn read_node(id: String, record: &Value) -> Option<Node> {
    if !record.is_object() {
        tracing::warn!(node_id = %id, "Node record is not an object, skipping");
        return None;
    }
    match serde_json::from_value::<Node>(record.clone()) {
        Ok(mut node) => {
            node.id = id;
            Some(node)
        }
        Err(e) => {
            tracing::warn!(node_id = %id, error = %e, "Could not read node record, skipping");
            None
        }
    }
}

fn normalize_links(value: &Value) -> Vec<Link> {
    let Some(records) = value.as_array() else {
        tracing::warn!("'links' is not a list, treating it as empty");
        return Vec::new();
    };
    records
        .iter()
        .filter_map(|record| {
            let link = Link::from_value(record);
            if link.is_none() {
                tracing::warn!(record = %record, "Malformed link record, skipping");
            }
            link
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keyed_nodes_keep_document_order() {
        let graph = WorkflowGraph::from_value(&json!({
            "nodes": {
                "9": { "type": "SaveImage" },
                "2": { "type": "CheckpointLoaderSimple" }
            },
            "links": []
        }))
        .unwrap();
        let ids: Vec<_> = graph.nodes().keys().cloned().collect();
        assert_eq!(ids, vec!["9", "2"]);
        assert_eq!(graph.node_shape(), NodeShape::Keyed);
        assert_eq!(graph.node("2").unwrap().id, "2");
    }

    #[test]
    fn test_listed_nodes_skip_records_without_id() {
        let graph = WorkflowGraph::from_value(&json!({
            "nodes": [
                { "id": 4, "type": "CLIPTextEncode" },
                { "type": "Orphan" },
                "not a node",
                { "id": "7", "type": "KSampler" }
            ],
            "links": [[1, 4, 0, 7, 1, "CONDITIONING"]]
        }))
        .unwrap();
        assert_eq!(graph.nodes().len(), 2);
        assert!(graph.node("4").is_some());
        assert!(graph.node("7").is_some());
        assert_eq!(graph.links().len(), 1);
        assert_eq!(graph.node_shape(), NodeShape::Listed);
    }

    #[test]
    fn test_unrecognized_nodes_shape() {
        let graph = WorkflowGraph::from_value(&json!({ "nodes": "oops", "links": [] })).unwrap();
        assert!(graph.nodes().is_empty());
        assert_eq!(graph.node_shape(), NodeShape::Unrecognized);
    }

    #[test]
    fn test_absent_keys_degrade_to_empty() {
        let graph = WorkflowGraph::from_value(&json!({})).unwrap();
        assert!(graph.nodes().is_empty());
        assert!(graph.links().is_empty());
        assert_eq!(graph.node_shape(), NodeShape::Absent);
    }

    #[test]
    fn test_non_object_document_is_an_error() {
        let err = WorkflowGraph::from_value(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, LoadError::NotAnObject);
    }

    #[test]
    fn test_malformed_links_are_skipped() {
        let graph = WorkflowGraph::from_value(&json!({
            "nodes": { "1": { "type": "SaveImage" } },
            "links": [[0, 2, 0, 1, 0, "MODEL"], [1, 2], null]
        }))
        .unwrap();
        assert_eq!(graph.links().len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = load_workflow_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
