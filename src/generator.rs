//! One generation attempt, end to end: compose the instruction text, call
//! the model once, validate the reply.

use thiserror::Error;
use tracing::{debug, info};

use crate::llm::client::LlmClient;
use crate::llm::prompts;
use crate::request::GenerationRequest;
use crate::specification::PromptSpecification;
use crate::validator::{self, ValidationError};

/// Why a generation attempt failed. Every variant is terminal for the
/// attempt: there is no internal retry, a fresh request is required.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The inference call itself failed (transport, provider error, empty
    /// completion). Opaque to the validation pipeline.
    #[error("inference request failed: {0}")]
    Upstream(anyhow::Error),

    /// The model replied, but the reply did not validate. Carries the raw
    /// completion via [`ValidationError::raw_response`].
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub struct PromptGenerator {
    client: Box<dyn LlmClient>,
}

impl PromptGenerator {
    pub fn new(client: Box<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Run one synchronous generation attempt for `request`.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<PromptSpecification, GenerateError> {
        let prompt = prompts::generation_prompt(request);
        debug!("Composed generation prompt ({} bytes)", prompt.len());

        let response = self
            .client
            .complete(&prompt)
            .await
            .map_err(GenerateError::Upstream)?;
        debug!("Model returned {} bytes", response.len());

        let spec = validator::validate_response(&response)?;
        info!(
            "Validated prompt specification for intent: {}",
            request.initial_intent()
        );
        Ok(spec)
    }
}
