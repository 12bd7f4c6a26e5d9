//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the keifu crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use keifu::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let document = load_workflow_file("path/to/workflow.json")?;
//! let findings = Analyzer::new().analyze(&document)?;
//! println!("{}", ReportFormatter::format(&findings));
//! # Ok(())
//! # }
//! ```

// Analysis entry points
pub use crate::analyzer::{Analyzer, AnalyzerBuilder, AnalyzerConfig};
pub use crate::analyze_workflow;

// Workflow model
pub use crate::workflow::{
    InputSlot, IntoWorkflow, Link, Node, NodeShape, PayloadType, WorkflowGraph, load_workflow_file,
};

// Results
pub use crate::report::{CategoryMap, Finding, ReportFormatter, labels};

// Error types
pub use crate::error::{AnalysisError, LoadError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
