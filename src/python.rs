use crate::analyzer::{Analyzer, AnalyzerConfig};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Traces a workflow graph back from its saved image.
///
/// The analyzer is configured once and can then be used repeatedly. Results
/// are exchanged as JSON strings so the host decides how to decode them.
#[pyclass(name = "Analyzer")]
struct AnalyzerPy {
    analyzer: Analyzer,
}

#[pymethods]
impl AnalyzerPy {
    /// Creates an analyzer.
    ///
    /// Args:
    ///     config_json (str | None): Optional JSON object overriding any of
    ///         the default heuristics (sink, LoRA and concat keywords, file
    ///         name categories).
    ///
    /// Raises:
    ///     ValueError: If `config_json` is not a valid configuration.
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => {
                AnalyzerConfig::from_json(json).map_err(|e| PyValueError::new_err(e.to_string()))?
            }
            None => AnalyzerConfig::default(),
        };
        Ok(AnalyzerPy {
            analyzer: Analyzer::builder().with_config(config).build(),
        })
    }

    /// Analyzes a workflow document.
    ///
    /// Args:
    ///     workflow_json (str): The workflow as JSON text, with `nodes` and
    ///         `links` keys.
    ///
    /// Returns:
    ///     str | None: The category map as JSON, or None when the analysis
    ///         could not run (malformed input, missing data, no save node).
    fn analyze(&self, workflow_json: &str) -> PyResult<Option<String>> {
        match self.analyzer.analyze_or_none(workflow_json) {
            Some(map) => serde_json::to_string(&map)
                .map(Some)
                .map_err(|e| PyValueError::new_err(e.to_string())),
            None => Ok(None),
        }
    }
}

/// Python bindings for the keifu workflow provenance tracer.
#[pymodule]
fn keifu(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<AnalyzerPy>()?;
    Ok(())
}
