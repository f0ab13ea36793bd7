//! Prompt template for the generation call.

use crate::request::GenerationRequest;

const ABSENT: &str = "None";

/// Build the instruction text sent to the model for a generation request.
///
/// Pure function of the request: the user's fields are restated verbatim
/// (absent optional fields become the literal `None`), followed by the exact
/// target schema and the fenced-JSON reply convention the validator expects.
pub fn generation_prompt(request: &GenerationRequest) -> String {
    format!(
        r#"You are an AI prompt engineering expert. Your task is to generate detailed and
structured prompts for various tasks. Ensure that all fields, including the
input structure, are filled with relevant data.

Create a detailed AI prompt structure based on:
Intent: {intent}
Examples: {examples}
Context: {context}
Constraints: {constraints}

Your response must include:
- System role
- Task description
- Input structure (as a dictionary with detailed fields)
- Step-by-step instructions (as a list)
- Output format (as a dictionary)
- Guidelines (as a list)
- Constraints (as a list)
- Examples (as a list)

Format your response as a JSON object wrapped in a markdown code block:
```json
{{
    "system_role": "...",
    "task_description": "...",
    "input_structure": {{
        "field_name": "what the field holds",
        "nested_settings": {{
            "option": "value"
        }}
    }},
    "step_by_step": ["step 1", "step 2", "..."],
    "output_format": {{"key": "value"}},
    "guidelines": ["guideline 1", "guideline 2", "..."],
    "constraints": ["constraint 1", "constraint 2", "..."],
    "examples": ["example 1", "example 2", "..."]
}}
```"#,
        intent = request.initial_intent(),
        examples = request.examples().unwrap_or(ABSENT),
        context = request.context().unwrap_or(ABSENT),
        constraints = request.constraints().unwrap_or(ABSENT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restates_all_provided_fields() {
        let request = GenerationRequest::new("generate a story")
            .unwrap()
            .with_examples(Some("Once upon a time...".to_string()))
            .with_context(Some("children's bedtime stories".to_string()))
            .with_constraints(Some("under 500 words".to_string()));

        let prompt = generation_prompt(&request);
        assert!(prompt.contains("Intent: generate a story"));
        assert!(prompt.contains("Examples: Once upon a time..."));
        assert!(prompt.contains("Context: children's bedtime stories"));
        assert!(prompt.contains("Constraints: under 500 words"));
    }

    #[test]
    fn absent_optional_fields_become_none() {
        let request = GenerationRequest::new("analyze sentiment").unwrap();
        let prompt = generation_prompt(&request);
        assert!(prompt.contains("Examples: None"));
        assert!(prompt.contains("Context: None"));
        assert!(prompt.contains("Constraints: None"));
    }

    #[test]
    fn names_every_schema_field() {
        let request = GenerationRequest::new("write an article").unwrap();
        let prompt = generation_prompt(&request);
        for field in [
            "system_role",
            "task_description",
            "input_structure",
            "step_by_step",
            "output_format",
            "guidelines",
            "constraints",
            "examples",
        ] {
            assert!(prompt.contains(field), "prompt must name {field}");
        }
    }

    #[test]
    fn asks_for_a_fenced_json_reply() {
        let request = GenerationRequest::new("write an article").unwrap();
        let prompt = generation_prompt(&request);
        assert!(prompt.contains("```json"));
        assert!(prompt.contains("markdown code block"));
    }
}
