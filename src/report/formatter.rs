use super::category::{CategoryMap, Finding};
use serde_json::Value;

/// Formats a category map into a human-readable report.
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format(map: &CategoryMap) -> String {
        if map.is_empty() {
            return "No specific inputs identified for the output image.\n".to_string();
        }

        let mut out = String::from("--- Identified Workflow Inputs ---\n");
        for (category, findings) in map.iter() {
            out.push_str(&format!("\nCategory: {}\n", category));
            for finding in findings {
                Self::format_finding(&mut out, finding);
            }
        }
        out
    }

    fn format_finding(out: &mut String, finding: &Finding) {
        out.push_str(&format!("  Node ID: {}\n", finding.node_id));
        out.push_str(&format!("  Node Type: {}\n", finding.node_type));
        if let Some(title) = &finding.title {
            out.push_str(&format!("  Title: {}\n", title));
        }
        if let Some(payload) = &finding.payload_type {
            out.push_str(&format!("  Type: {}\n", payload));
        }
        if let Some(value) = &finding.value {
            out.push_str(&format!("  Value: {}\n", Self::format_value(value)));
        }
        if let Some(description) = &finding.description {
            out.push_str(&format!("  Description: {}\n", description));
        }
        out.push_str(&"-".repeat(30));
        out.push('\n');
    }

    /// Strings print bare; everything else prints as compact JSON.
    fn format_value(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
