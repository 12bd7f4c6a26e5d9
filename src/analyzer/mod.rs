use crate::error::AnalysisError;
use crate::graph::{NodeRoles, locate_sink};
use crate::report::{CategoryMap, normalize};
use crate::tracer::ProvenanceTracer;
use crate::workflow::{IntoWorkflow, NodeShape};

mod config;

pub use config::*;

/// The top-level entry point: load, locate the sink, trace, normalize.
///
/// An `Analyzer` holds only its configuration. Every call builds fresh
/// traversal state, so one instance can serve many threads.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

pub struct AnalyzerBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
        }
    }
    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }
    pub fn with_sink_keyword(mut self, keyword: &str) -> Self {
        self.config.sink_keywords.push(keyword.to_string());
        self
    }
    pub fn with_sink_fallback_type(mut self, node_type: &str) -> Self {
        self.config.sink_fallback_type = node_type.to_string();
        self
    }
    pub fn with_lora_keyword(mut self, keyword: &str) -> Self {
        self.config.lora_keywords.push(keyword.to_string());
        self
    }
    pub fn with_concat_keyword(mut self, keyword: &str) -> Self {
        self.config.concat_keywords.push(keyword.to_string());
        self
    }
    pub fn with_filename_category(mut self, category: &str) -> Self {
        self.config.filename_categories.push(category.to_string());
        self
    }
    pub fn build(self) -> Analyzer {
        Analyzer {
            config: self.config,
        }
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Runs a full analysis.
    ///
    /// # Returns
    ///
    /// * `Ok(CategoryMap)`: The normalized findings. Once a sink is found this
    ///   is never empty in practice, since a sourceless sink files itself.
    /// * `Err(AnalysisError)`: The analysis could not run: the document is not
    ///   an object, `nodes` could not be normalized, nodes or links are
    ///   empty, or no sink node exists.
    pub fn analyze<W: IntoWorkflow>(&self, workflow: W) -> Result<CategoryMap, AnalysisError> {
        let graph = workflow.into_workflow()?;

        if graph.node_shape() == NodeShape::Unrecognized {
            return Err(AnalysisError::UnrecognizedNodes);
        }
        if graph.nodes().is_empty() || graph.links().is_empty() {
            return Err(AnalysisError::MissingGraphData {
                nodes: graph.nodes().len(),
                links: graph.links().len(),
            });
        }

        let roles = NodeRoles::new(&self.config);
        let (sink_id, _) = locate_sink(&graph, &roles).ok_or(AnalysisError::NoSinkNode)?;

        let raw = ProvenanceTracer::new(&graph, roles).trace(sink_id);
        Ok(normalize(raw, &self.config.filename_categories))
    }

    /// Like `analyze`, but reports failure as `None` after logging the reason.
    pub fn analyze_or_none<W: IntoWorkflow>(&self, workflow: W) -> Option<CategoryMap> {
        match self.analyze(workflow) {
            Ok(map) => Some(map),
            Err(e) => {
                tracing::error!(error = %e, "Workflow analysis could not run");
                None
            }
        }
    }
}
