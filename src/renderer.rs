//! Renders a validated [`PromptSpecification`] as a markdown document.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::info;

use crate::specification::PromptSpecification;

/// Fixed name for the exported document.
pub const DEFAULT_OUTPUT_FILE: &str = "optimized_prompt.md";

const NEST_INDENT: usize = 4;

/// Produce the display document for a specification. Deterministic: the same
/// specification always renders to the same bytes. Sections appear in fixed
/// order with fixed headings; the structure mappings render as indented
/// bullet lists rather than JSON, recursing through nesting without a depth
/// limit.
pub fn render(spec: &PromptSpecification) -> String {
    let mut doc = String::new();

    doc.push_str("### System Role:\n");
    doc.push_str(&spec.system_role);
    doc.push_str("\n\n### Task Description:\n");
    doc.push_str(&spec.task_description);
    doc.push('\n');

    doc.push_str("\n### Input Structure:\n");
    render_mapping(&mut doc, &spec.input_structure, 0);

    doc.push_str("\n### Step-by-Step Instructions:\n");
    render_list(&mut doc, &spec.step_by_step);

    doc.push_str("\n### Output Format:\n");
    render_mapping(&mut doc, &spec.output_format, 0);

    doc.push_str("\n### Guidelines:\n");
    render_list(&mut doc, &spec.guidelines);

    doc.push_str("\n### Constraints:\n");
    render_list(&mut doc, &spec.constraints);

    doc.push_str("\n### Examples:\n");
    render_list(&mut doc, &spec.examples);

    doc
}

/// Write a rendered document to disk.
pub fn save_document(document: &str, path: &Path) -> Result<()> {
    fs::write(path, document)
        .with_context(|| format!("failed to write document to {}", path.display()))?;
    info!("Saved prompt document to {}", path.display());
    Ok(())
}

fn render_list(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "- {}", item);
    }
}

fn render_mapping(out: &mut String, mapping: &Map<String, Value>, indent: usize) {
    for (key, value) in mapping {
        match value {
            Value::Object(nested) => {
                let _ = writeln!(out, "{:indent$}- **{}**:", "", key);
                render_mapping(out, nested, indent + NEST_INDENT);
            }
            other => {
                let _ = writeln!(out, "{:indent$}- **{}**: {}", "", key, scalar_text(other));
            }
        }
    }
}

/// Leaf rendering: strings appear as-is, everything else in compact JSON
/// form (numbers, booleans, null, and arrays of non-structure values).
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_spec() -> PromptSpecification {
        PromptSpecification {
            system_role: "You are a data analyst".to_string(),
            task_description: "Summarize a CSV file".to_string(),
            input_structure: serde_json::from_value(json!({
                "file_name": "name of the CSV file",
                "columns": {"date": "ISO-8601", "amount": "decimal"}
            }))
            .unwrap(),
            step_by_step: vec!["load the file".to_string(), "compute totals".to_string()],
            output_format: serde_json::from_value(json!({
                "summary": {"rows": "integer", "total": "decimal"}
            }))
            .unwrap(),
            guidelines: vec!["round to two decimals".to_string()],
            constraints: vec!["do not invent columns".to_string()],
            examples: vec!["total: 42.00".to_string()],
        }
    }

    #[test]
    fn all_headings_in_fixed_order() {
        let doc = render(&sample_spec());
        let headings = [
            "### System Role:",
            "### Task Description:",
            "### Input Structure:",
            "### Step-by-Step Instructions:",
            "### Output Format:",
            "### Guidelines:",
            "### Constraints:",
            "### Examples:",
        ];
        let mut last = 0;
        for heading in headings {
            let pos = doc[last..]
                .find(heading)
                .unwrap_or_else(|| panic!("missing or misordered heading {heading}"));
            last += pos;
        }
    }

    #[test]
    fn nested_mapping_indents_per_level() {
        let doc = render(&sample_spec());
        assert!(doc.contains("- **columns**:\n    - **date**: ISO-8601"));
    }

    #[test]
    fn scalar_leaves_render_plainly() {
        assert_eq!(scalar_text(&json!("text")), "text");
        assert_eq!(scalar_text(&json!(3)), "3");
        assert_eq!(scalar_text(&json!(true)), "true");
        assert_eq!(scalar_text(&json!(["a", "b"])), r#"["a","b"]"#);
    }

    #[test]
    fn list_sections_render_as_bullets() {
        let doc = render(&sample_spec());
        assert!(doc.contains("- load the file\n- compute totals\n"));
        assert!(doc.contains("- do not invent columns\n"));
    }
}
