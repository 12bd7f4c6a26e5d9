use serde::{Deserialize, Serialize};

pub const DEFAULT_SINK_KEYWORDS: &[&str] = &["save", "output", "export"];
pub const DEFAULT_SINK_FALLBACK_TYPE: &str = "Save Image";
pub const DEFAULT_LORA_KEYWORDS: &[&str] =
    &["lora", "loraloader", "loadlora", "applylora", "apply_lora"];
pub const DEFAULT_CONCAT_KEYWORDS: &[&str] = &["concat"];
pub const DEFAULT_FILENAME_CATEGORIES: &[&str] =
    &["Base Models", "VAE", "CLIP", "Checkpoint", "Model", "LoRA Models"];

/// The tunable heuristics behind an analysis.
///
/// Every field has a default, so a partial JSON document is a valid config.
/// Keyword matches are case-insensitive substring matches on node types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub sink_keywords: Vec<String>,
    /// Exact type name accepted as a sink when the node declares no inputs.
    pub sink_fallback_type: String,
    pub lora_keywords: Vec<String>,
    pub concat_keywords: Vec<String>,
    /// Categories whose single string values are reduced to a file name.
    pub filename_categories: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sink_keywords: owned(DEFAULT_SINK_KEYWORDS),
            sink_fallback_type: DEFAULT_SINK_FALLBACK_TYPE.to_string(),
            lora_keywords: owned(DEFAULT_LORA_KEYWORDS),
            concat_keywords: owned(DEFAULT_CONCAT_KEYWORDS),
            filename_categories: owned(DEFAULT_FILENAME_CATEGORIES),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
