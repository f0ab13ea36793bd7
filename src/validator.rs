//! Turns raw model output into a [`PromptSpecification`] or a well-defined
//! failure.
//!
//! The pipeline is two-stage: a delimiter scan locates the candidate JSON
//! text inside the (possibly chatty) completion, then a strict shape check
//! over the parsed value produces the typed record. Every failure keeps the
//! full raw completion so the caller can show what the model actually said.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::specification::PromptSpecification;

const JSON_FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

#[derive(Debug, Error)]
pub enum ValidationError {
    /// The candidate text did not parse as JSON.
    #[error("model response is not valid JSON: {reason}")]
    MalformedJson { reason: String, raw: String },

    /// The parsed JSON is missing a required field, or the field has the
    /// wrong type. `field` names the first offender.
    #[error("model response is missing or has the wrong type for `{field}`")]
    SchemaViolation { field: &'static str, raw: String },
}

impl ValidationError {
    /// The full raw completion that failed, for diagnostics.
    pub fn raw_response(&self) -> &str {
        match self {
            ValidationError::MalformedJson { raw, .. } => raw,
            ValidationError::SchemaViolation { raw, .. } => raw,
        }
    }
}

/// Extract, parse, and shape-check a raw model completion.
pub fn validate_response(raw: &str) -> Result<PromptSpecification, ValidationError> {
    let candidate = extract_candidate(raw)?;
    debug!("candidate JSON text is {} bytes", candidate.len());

    let value: Value =
        serde_json::from_str(candidate).map_err(|err| ValidationError::MalformedJson {
            reason: err.to_string(),
            raw: raw.to_string(),
        })?;

    specification_from_value(&value, raw)
}

/// Locate the candidate JSON text.
///
/// If the completion contains a ```json fence, the candidate is the text
/// between the first opening fence and the next closing fence. Only the
/// first block is consulted. An opening fence with no close is rejected
/// rather than guessing a boundary. Without any ```json fence the whole
/// trimmed completion is the candidate.
fn extract_candidate(raw: &str) -> Result<&str, ValidationError> {
    let Some(open) = raw.find(JSON_FENCE_OPEN) else {
        return Ok(raw.trim());
    };

    let body_start = open + JSON_FENCE_OPEN.len();
    match raw[body_start..].find(FENCE_CLOSE) {
        Some(end) => Ok(raw[body_start..body_start + end].trim()),
        None => Err(ValidationError::MalformedJson {
            reason: "unterminated ```json block".to_string(),
            raw: raw.to_string(),
        }),
    }
}

/// Shape-check the parsed value field by field, in the order the schema
/// declares them, and build the record verbatim from the parsed values.
fn specification_from_value(
    value: &Value,
    raw: &str,
) -> Result<PromptSpecification, ValidationError> {
    let fields = value.as_object();

    Ok(PromptSpecification {
        system_role: require_text(fields, "system_role", raw)?,
        task_description: require_text(fields, "task_description", raw)?,
        input_structure: require_mapping(fields, "input_structure", raw)?,
        step_by_step: require_text_list(fields, "step_by_step", raw)?,
        output_format: require_mapping(fields, "output_format", raw)?,
        guidelines: require_text_list(fields, "guidelines", raw)?,
        constraints: require_text_list(fields, "constraints", raw)?,
        examples: require_text_list(fields, "examples", raw)?,
    })
}

fn violation(field: &'static str, raw: &str) -> ValidationError {
    ValidationError::SchemaViolation {
        field,
        raw: raw.to_string(),
    }
}

fn require_text(
    fields: Option<&Map<String, Value>>,
    field: &'static str,
    raw: &str,
) -> Result<String, ValidationError> {
    fields
        .and_then(|f| f.get(field))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| violation(field, raw))
}

fn require_text_list(
    fields: Option<&Map<String, Value>>,
    field: &'static str,
    raw: &str,
) -> Result<Vec<String>, ValidationError> {
    let items = fields
        .and_then(|f| f.get(field))
        .and_then(Value::as_array)
        .ok_or_else(|| violation(field, raw))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| violation(field, raw))
        })
        .collect()
}

fn require_mapping(
    fields: Option<&Map<String, Value>>,
    field: &'static str,
    raw: &str,
) -> Result<Map<String, Value>, ValidationError> {
    fields
        .and_then(|f| f.get(field))
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| violation(field, raw))
}
