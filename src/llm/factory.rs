use anyhow::{bail, Result};

use super::client::LlmClient;
use super::client::MockLlmClient;
use super::client_impl::{AnthropicClient, HuggingFaceClient, OpenAIClient};
use crate::config::Config;

/// Create an LLM client based on configuration
pub fn create_client(config: &Config, dry_run: bool) -> Result<Box<dyn LlmClient>> {
    if dry_run {
        return Ok(Box::new(MockLlmClient::new()));
    }

    let api_key = config.get_api_key()?;
    let max_new_tokens = config.llm.get_max_new_tokens();
    let temperature = Some(config.generation.temperature);
    let timeout_secs = config.generation.timeout_secs;

    match config.llm.provider.as_str() {
        "hf" => Ok(Box::new(
            HuggingFaceClient::new(
                api_key,
                config.llm.model.clone(),
                max_new_tokens,
                timeout_secs,
            )?
            .with_sampling(temperature, config.generation.seed),
        )),

        "anthropic" => Ok(Box::new(
            AnthropicClient::new(
                api_key,
                config.llm.model.clone(),
                max_new_tokens,
                timeout_secs,
            )?
            .with_temperature(temperature),
        )),

        "openai" => Ok(Box::new(
            OpenAIClient::new(
                api_key,
                config.llm.model.clone(),
                max_new_tokens,
                timeout_secs,
            )?
            .with_temperature(temperature),
        )),

        "openai-compatible" => {
            let base_url = config
                .llm
                .base_url
                .clone()
                .unwrap_or_else(|| "http://localhost:11434/v1".to_string());

            Ok(Box::new(
                OpenAIClient::with_base_url(
                    api_key,
                    config.llm.model.clone(),
                    base_url,
                    max_new_tokens,
                    timeout_secs,
                )?
                .with_temperature(temperature),
            ))
        }

        unknown => bail!("Unknown LLM provider: {}", unknown),
    }
}
