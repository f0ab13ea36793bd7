//! The user's statement of what they want a prompt for.

use anyhow::{bail, Result};

/// A single generation request. Built once from user input, then read-only:
/// the optional fields are attached at construction time and the struct is
/// consumed by one generation attempt.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    initial_intent: String,
    examples: Option<String>,
    context: Option<String>,
    constraints: Option<String>,
}

impl GenerationRequest {
    /// The intent is the only required field and must not be blank.
    pub fn new(initial_intent: impl Into<String>) -> Result<Self> {
        let initial_intent = initial_intent.into();
        if initial_intent.trim().is_empty() {
            bail!("initial intent must not be empty");
        }
        Ok(Self {
            initial_intent,
            examples: None,
            context: None,
            constraints: None,
        })
    }

    pub fn with_examples(mut self, examples: Option<String>) -> Self {
        self.examples = examples;
        self
    }

    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context;
        self
    }

    pub fn with_constraints(mut self, constraints: Option<String>) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn initial_intent(&self) -> &str {
        &self.initial_intent
    }

    pub fn examples(&self) -> Option<&str> {
        self.examples.as_deref()
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn constraints(&self) -> Option<&str> {
        self.constraints.as_deref()
    }
}
