use super::category::{CategoryMap, Finding};
use ahash::AHashSet;
use serde_json::Value;

/// Post-processes a raw category map.
///
/// Within each category, later findings for an already-seen `node_id` are
/// dropped. Single-element value lists are unwrapped, and an unwrapped string
/// in one of `filename_categories` is reduced to its final path component.
/// Applying this twice yields the same map.
pub fn normalize(raw: CategoryMap, filename_categories: &[String]) -> CategoryMap {
    raw.into_iter()
        .map(|(category, findings)| {
            let strip_paths = filename_categories.iter().any(|c| *c == category);
            let mut seen = AHashSet::new();
            let findings = findings
                .into_iter()
                .filter(|finding| seen.insert(finding.node_id.clone()))
                .map(|finding| flatten_value(finding, strip_paths))
                .collect();
            (category, findings)
        })
        .collect()
}

fn flatten_value(mut finding: Finding, strip_paths: bool) -> Finding {
    let mut single = match &finding.value {
        Some(Value::Array(values)) if values.len() == 1 => values[0].clone(),
        _ => return finding,
    };
    // Nested singletons unwrap all the way down so a second pass is a no-op.
    while let Value::Array(inner) = &single {
        if inner.len() != 1 {
            break;
        }
        single = inner[0].clone();
    }
    finding.value = Some(match single {
        Value::String(path) if strip_paths => Value::String(file_name(&path).to_string()),
        other => other,
    });
    finding
}

/// Final component of a path, accepting both `/` and `\` separators.
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
