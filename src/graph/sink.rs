use super::roles::{NodeRoles, accepts_image};
use crate::workflow::{Node, WorkflowGraph};

/// Finds the terminal save/output node that tracing starts from.
///
/// Nodes are scanned in document order and the first qualifying one wins. A
/// candidate that declares inputs must accept an image; a candidate without
/// any `inputs` key qualifies only through the exact fallback type name.
pub fn locate_sink<'g>(
    graph: &'g WorkflowGraph,
    roles: &NodeRoles<'_>,
) -> Option<(&'g str, &'g Node)> {
    for (id, node) in graph.nodes() {
        if !roles.is_sink_candidate(node) {
            continue;
        }
        let qualifies = match &node.inputs {
            Some(_) => accepts_image(node),
            None => roles.is_fallback_sink(node),
        };
        if qualifies {
            tracing::info!(node_id = %id, node_type = %node.node_type, "Identified image save node");
            return Some((id.as_str(), node));
        }
    }
    tracing::warn!("Could not identify an image save node");
    None
}
