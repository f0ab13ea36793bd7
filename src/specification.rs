//! The validated output record of a generation attempt.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A structured prompt specification as returned by the model and validated
/// by [`crate::validator`]. An instance of this type exists only if every
/// field below was present and well-typed in the model's reply — there is no
/// partially-filled state.
///
/// `input_structure` and `output_format` keep the model's key order
/// (serde_json is built with `preserve_order`), so rendering the same
/// specification twice produces identical documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptSpecification {
    /// The role/persona the downstream AI should adopt.
    pub system_role: String,
    /// Clear description of the task.
    pub task_description: String,
    /// Expected input variables, possibly nested.
    pub input_structure: Map<String, Value>,
    /// Detailed step-by-step instructions.
    pub step_by_step: Vec<String>,
    /// Expected shape of the output, possibly nested.
    pub output_format: Map<String, Value>,
    /// Guidelines for the model to follow.
    pub guidelines: Vec<String>,
    /// Restrictions the model must respect.
    pub constraints: Vec<String>,
    /// Worked examples to guide the model.
    pub examples: Vec<String>,
}
