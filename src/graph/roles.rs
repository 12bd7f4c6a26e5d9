//! Node-role heuristics.
//!
//! Node types are free-form strings, so roles are decided by substring matches
//! against configurable keyword lists. Each predicate stands alone so it can be
//! tuned without touching the traversal.

use crate::analyzer::AnalyzerConfig;
use crate::workflow::Node;

/// Keyword-driven role predicates bound to one configuration.
#[derive(Debug, Clone, Copy)]
pub struct NodeRoles<'a> {
    config: &'a AnalyzerConfig,
}

impl<'a> NodeRoles<'a> {
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        Self { config }
    }

    /// The type name suggests a save/output/export action.
    pub fn is_sink_candidate(&self, node: &Node) -> bool {
        contains_any(&node.node_type, &self.config.sink_keywords)
    }

    /// The exact type name accepted as a sink when the node declares no inputs.
    pub fn is_fallback_sink(&self, node: &Node) -> bool {
        node.node_type == self.config.sink_fallback_type
    }

    pub fn is_lora_loader(&self, node: &Node) -> bool {
        contains_any(&node.node_type, &self.config.lora_keywords)
    }

    pub fn is_concat(&self, node: &Node) -> bool {
        contains_any(&node.node_type, &self.config.concat_keywords)
    }
}

/// The node declares an input slot of type `image`.
pub fn accepts_image(node: &Node) -> bool {
    node.inputs
        .iter()
        .flatten()
        .any(|slot| slot.slot_type.eq_ignore_ascii_case("image"))
}

/// The node consumes another model through an input named `model`, which marks
/// it as a transformation applied on top of a base model.
pub fn consumes_model(node: &Node) -> bool {
    node.inputs
        .iter()
        .flatten()
        .any(|slot| slot.name.eq_ignore_ascii_case("model") && slot.slot_type == "MODEL")
}

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    keywords
        .iter()
        .any(|keyword| haystack.contains(&keyword.to_lowercase()))
}
