//! # Keifu - Workflow Provenance Tracer
//!
//! **Keifu** reconstructs the lineage of a generated image from the node-link
//! workflow that produced it. Starting at the node that saved the image, it
//! walks the graph backward along typed links and reports the models, prompts
//! and parameters that fed the output, grouped by category.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: Hand the analyzer a parsed workflow document (or anything
//!     implementing `IntoWorkflow`). Nodes may arrive keyed by id or as a list;
//!     both are normalized into one canonical `WorkflowGraph`.
//! 2.  **Locate the sink**: The first save/output node that accepts an image is
//!     the trace origin.
//! 3.  **Trace**: Every link into a visited node is interpreted by its payload
//!     type. Conditioning links resolve their full prompt text, model links are
//!     filed as base or LoRA models, and parameter links are filed under their
//!     own tag.
//! 4.  **Normalize**: Findings are deduplicated per category, single-value lists
//!     are unwrapped and model paths are reduced to file names.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use keifu::prelude::*;
//! use serde_json::json;
//!
//! let workflow = json!({
//!     "nodes": [
//!         { "id": 1, "type": "SaveImage", "inputs": [{ "name": "images", "type": "IMAGE" }] },
//!         { "id": 2, "type": "CheckpointLoaderSimple", "widgets_values": ["sdxl/base.safetensors"] }
//!     ],
//!     "links": [[0, 2, 0, 1, 0, "MODEL"]]
//! });
//!
//! let analyzer = Analyzer::builder().with_lora_keyword("lycoris").build();
//! match analyzer.analyze(&workflow) {
//!     Ok(findings) => print!("{}", ReportFormatter::format(&findings)),
//!     Err(e) => eprintln!("Analysis could not run: {}", e),
//! }
//! ```

pub mod analyzer;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod report;
pub mod tracer;
pub mod workflow;

#[cfg(feature = "python-bindings")]
mod python;

use crate::analyzer::Analyzer;
use crate::report::CategoryMap;

/// Analyzes a parsed workflow document with the default configuration.
///
/// Returns `None` when the analysis could not run at all (malformed document,
/// missing nodes or links, no sink). The reason is logged.
pub fn analyze_workflow(document: &serde_json::Value) -> Option<CategoryMap> {
    Analyzer::new().analyze_or_none(document)
}
