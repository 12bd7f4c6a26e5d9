use crate::graph::{EdgeIndex, NodeRoles, consumes_model};
use crate::report::{CategoryMap, Finding, PROMPT_PAYLOAD, SOURCE_NODE_DESCRIPTION, labels};
use crate::workflow::{Link, Node, PayloadType, WorkflowGraph};
use ahash::AHashSet;
use serde_json::Value;

mod text;

pub(crate) use text::TextResolver;

/// Walks a workflow backward from its sink and files what it finds into
/// categories.
///
/// The walk is a depth-first traversal driven by an explicit stack. Each link
/// into the current node is categorized, then its source is descended into
/// before the next link is considered, so findings appear in the same order a
/// recursive walk would record them. A node is expanded at most once per trace.
pub struct ProvenanceTracer<'a> {
    graph: &'a WorkflowGraph,
    index: EdgeIndex<'a>,
    roles: NodeRoles<'a>,
}

/// A node whose incoming links are still being processed.
struct Frame<'s, 'a> {
    node: &'a Node,
    links: &'s [&'a Link],
    next: usize,
}

impl<'a> ProvenanceTracer<'a> {
    pub fn new(graph: &'a WorkflowGraph, roles: NodeRoles<'a>) -> Self {
        Self {
            graph,
            index: EdgeIndex::new(graph.links()),
            roles,
        }
    }

    /// Traces everything upstream of `sink_id` into a raw (un-normalized)
    /// category map.
    pub fn trace(&self, sink_id: &str) -> CategoryMap {
        let mut findings = CategoryMap::new();
        let Some((start, _)) = self.graph.nodes().get_key_value(sink_id) else {
            tracing::warn!(node_id = %sink_id, "Trace start node not found in workflow nodes");
            return findings;
        };

        let mut visited: AHashSet<&'a str> = AHashSet::new();
        let mut stack: Vec<Frame<'_, 'a>> = Vec::new();
        if let Some(frame) = self.enter(start, &mut visited, &mut findings) {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            let Some(&link) = frame.links.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            let current = frame.node;

            self.categorize(current, link, &mut findings);
            if let Some(child) = self.enter(&link.source, &mut visited, &mut findings) {
                stack.push(child);
            }
        }

        findings
    }

    /// Marks `id` visited and opens a frame over its incoming links. Sourceless
    /// nodes are settled here and never produce a frame.
    fn enter<'s>(
        &'s self,
        id: &'a str,
        visited: &mut AHashSet<&'a str>,
        findings: &mut CategoryMap,
    ) -> Option<Frame<'s, 'a>> {
        if !visited.insert(id) {
            return None;
        }
        let Some(node) = self.graph.node(id) else {
            tracing::warn!(node_id = %id, "Node not found in workflow nodes");
            return None;
        };
        tracing::debug!(node_id = %id, node_type = %node.node_type, "Tracing node");

        let links = self.index.incoming(id);
        if links.is_empty() {
            // Nodes already filed elsewhere are not counted twice.
            if node.is_enabled() && !node.has_widgets() && !findings.contains_node(id) {
                findings.push(
                    labels::SOURCE_NODES,
                    Finding::new(id, node.display_type())
                        .with_title(node.title.clone())
                        .with_description(SOURCE_NODE_DESCRIPTION),
                );
            }
            return None;
        }

        Some(Frame {
            node,
            links,
            next: 0,
        })
    }

    fn categorize(&self, current: &Node, link: &'a Link, findings: &mut CategoryMap) {
        match &link.payload {
            PayloadType::Conditioning => self.record_prompt(current, link, findings),
            PayloadType::Model => self.record_model(link, findings),
            payload if payload.is_parameter() => self.record_parameter(link, findings),
            _ => {}
        }
    }

    /// The prompt category comes from the name of the input slot the link
    /// feeds on the current node.
    fn record_prompt(&self, current: &Node, link: &'a Link, findings: &mut CategoryMap) {
        let slot_name = link
            .target_slot
            .and_then(|slot| current.input_name(slot))
            .map(str::to_lowercase);
        let category = match slot_name.as_deref() {
            Some(name) if name.contains("positive") => labels::POSITIVE_PROMPTS,
            Some(name) if name.contains("negative") => labels::NEGATIVE_PROMPTS,
            _ => {
                tracing::debug!(
                    node_id = %current.id,
                    slot = ?slot_name,
                    "Conditioning input is neither positive nor negative"
                );
                return;
            }
        };

        let resolver = TextResolver::new(self.graph, &self.index, self.roles);
        let Some(prompt) = resolver.resolve_prompt(&link.source) else {
            return;
        };

        let bucket = findings.entry(category);
        if bucket
            .iter()
            .any(|f| f.value.as_ref().and_then(Value::as_str) == Some(prompt.as_str()))
        {
            return;
        }

        let source = self.graph.node(&link.source);
        bucket.push(
            Finding::new(
                link.source.clone(),
                source.map_or("Unknown Type", Node::display_type),
            )
            .with_title(source.and_then(|n| n.title.clone()))
            .with_payload(PROMPT_PAYLOAD)
            .with_value(Value::String(prompt)),
        );
    }

    fn record_model(&self, link: &Link, findings: &mut CategoryMap) {
        let Some(source) = self.graph.node(&link.source) else {
            return;
        };
        if !source.is_enabled() {
            tracing::debug!(node_id = %source.id, "Model source is disabled, passing through");
            return;
        }
        if !source.has_widgets() {
            return;
        }

        let category = if self.roles.is_lora_loader(source) || consumes_model(source) {
            labels::LORA_MODELS
        } else {
            labels::BASE_MODELS
        };

        let payload = link.payload.as_str();
        let bucket = findings.entry(category);
        if bucket
            .iter()
            .any(|f| f.node_id == source.id && f.payload_type.as_deref() == Some(payload))
        {
            return;
        }
        bucket.push(Self::widget_finding(source, payload));
    }

    fn record_parameter(&self, link: &Link, findings: &mut CategoryMap) {
        let Some(source) = self.graph.node(&link.source) else {
            return;
        };
        if source.is_enabled() && source.has_widgets() {
            let payload = link.payload.as_str();
            findings.push(payload, Self::widget_finding(source, payload));
        }
    }

    fn widget_finding(source: &Node, payload: &str) -> Finding {
        Finding::new(source.id.clone(), source.display_type())
            .with_title(source.title.clone())
            .with_payload(payload)
            .with_value(Value::Array(source.widgets_values.clone()))
    }
}
