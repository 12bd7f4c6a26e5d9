use thiserror::Error;

/// Errors that can occur while reading a workflow document.
///
/// Only whole-document failures surface here. Individual node or link records
/// that cannot be read are skipped with a warning instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Workflow document is not a JSON object")]
    NotAnObject,

    #[error("Could not read workflow file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse workflow JSON: {0}")]
    Json(String),
}

/// Reasons an analysis could not run at all.
///
/// These are distinct from an analysis that ran and found nothing, which is
/// reported as an empty `CategoryMap`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Workflow 'nodes' is neither a mapping nor a list of node records")]
    UnrecognizedNodes,

    #[error("Workflow is missing nodes or links data ({nodes} nodes, {links} links)")]
    MissingGraphData { nodes: usize, links: usize },

    #[error("Could not find an image save node to start tracing from")]
    NoSinkNode,
}
