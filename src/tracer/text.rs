use crate::graph::{EdgeIndex, NodeRoles};
use crate::workflow::{Node, WorkflowGraph};
use ahash::AHashSet;
use itertools::Itertools;
use serde_json::Value;

/// Resolves the literal text behind a conditioning source.
///
/// Each resolution owns its visited set, so the same upstream node may feed
/// several prompts. The walk uses an explicit stack; the collected parts come
/// out in the same order a depth-first recursion would produce them.
pub(crate) struct TextResolver<'s, 'a> {
    graph: &'a WorkflowGraph,
    index: &'s EdgeIndex<'a>,
    roles: NodeRoles<'a>,
}

/// A node whose upstream text sources are still being resolved. Parts from
/// its subtree land in the shared output after position `start`.
struct Frame<'a> {
    node: &'a Node,
    concat: bool,
    upstream: Vec<&'a str>,
    next: usize,
    start: usize,
}

impl<'s, 'a> TextResolver<'s, 'a> {
    pub(crate) fn new(
        graph: &'a WorkflowGraph,
        index: &'s EdgeIndex<'a>,
        roles: NodeRoles<'a>,
    ) -> Self {
        Self {
            graph,
            index,
            roles,
        }
    }

    /// The full prompt behind `start`: all parts joined by a single space and
    /// trimmed. `None` when no part was found.
    pub(crate) fn resolve_prompt(&self, start: &'a str) -> Option<String> {
        let parts = self.resolve(start);
        if parts.is_empty() {
            return None;
        }
        Some(parts.iter().join(" ").trim().to_string())
    }

    /// The ordered text parts contributed by `start` and its upstream chain.
    ///
    /// A node's own literals always follow everything its upstream produced,
    /// so every frame appends to one output buffer.
    pub(crate) fn resolve(&self, start: &'a str) -> Vec<String> {
        let mut visited = AHashSet::new();
        let mut parts = Vec::new();
        let mut stack: Vec<Frame<'a>> = Vec::new();
        stack.extend(self.enter(start, &mut visited, parts.len()));

        while let Some(frame) = stack.last_mut() {
            if let Some(&source) = frame.upstream.get(frame.next) {
                frame.next += 1;
                if let Some(child) = self.enter(source, &mut visited, parts.len()) {
                    stack.push(child);
                }
                continue;
            }

            if let Some(finished) = stack.pop() {
                Self::finish(finished, &mut parts);
            }
        }
        parts
    }

    fn enter(&self, id: &'a str, visited: &mut AHashSet<&'a str>, start: usize) -> Option<Frame<'a>> {
        if !visited.insert(id) {
            return None;
        }
        let Some(node) = self.graph.node(id) else {
            tracing::debug!(node_id = %id, "Text source not found in workflow nodes");
            return None;
        };
        if !node.is_enabled() {
            return None;
        }

        let upstream = self
            .index
            .incoming(id)
            .iter()
            .filter(|link| link.payload.carries_text())
            .map(|link| link.source.as_str())
            .collect();

        Some(Frame {
            node,
            concat: self.roles.is_concat(node),
            upstream,
            next: 0,
            start,
        })
    }

    /// Linked parts come first. A concatenation node then appends all of its
    /// scalar literals; any other node falls back to its first literal only
    /// when nothing upstream produced text.
    fn finish(frame: Frame<'a>, parts: &mut Vec<String>) {
        let widgets = &frame.node.widgets_values;
        if frame.concat {
            parts.extend(widgets.iter().filter_map(scalar_text));
        } else if parts.len() == frame.start {
            parts.extend(widgets.first().and_then(literal_text));
        }
    }
}

/// Text form of a scalar widget value. Lists, objects and nulls have none.
/// Booleans are capitalised to match how workflow hosts print them.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        _ => None,
    }
}

/// Text form of any non-null widget value; structured values print as JSON.
fn literal_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
        scalar => scalar_text(scalar),
    }
}
