use super::definition::WorkflowGraph;
use crate::error::LoadError;
use serde_json::Value;

/// A trait for inputs that can be turned into a canonical `WorkflowGraph`.
///
/// The analyzer accepts anything implementing this trait, so callers can hand
/// it a parsed JSON document, raw JSON text, or a graph they assembled
/// themselves.
///
/// # Example
///
/// ```rust,no_run
/// use keifu::prelude::*;
///
/// let text = r#"{ "nodes": [], "links": [] }"#;
/// let graph = text.into_workflow().unwrap();
/// assert!(graph.nodes().is_empty());
/// ```
pub trait IntoWorkflow {
    /// Consumes the input and converts it into a `WorkflowGraph`.
    fn into_workflow(self) -> Result<WorkflowGraph, LoadError>;
}

impl IntoWorkflow for WorkflowGraph {
    fn into_workflow(self) -> Result<WorkflowGraph, LoadError> {
        Ok(self)
    }
}

impl IntoWorkflow for &Value {
    fn into_workflow(self) -> Result<WorkflowGraph, LoadError> {
        WorkflowGraph::from_value(self)
    }
}

impl IntoWorkflow for Value {
    fn into_workflow(self) -> Result<WorkflowGraph, LoadError> {
        WorkflowGraph::from_value(&self)
    }
}

impl IntoWorkflow for &str {
    fn into_workflow(self) -> Result<WorkflowGraph, LoadError> {
        let document: Value =
            serde_json::from_str(self).map_err(|e| LoadError::Json(e.to_string()))?;
        WorkflowGraph::from_value(&document)
    }
}
