use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::client::LlmClient;
use crate::util::SecretString;

// ============================================================================
// Hugging Face Inference API Client
// ============================================================================

pub struct HuggingFaceClient {
    api_key: SecretString,
    model: String,
    base_url: String,
    max_new_tokens: u32,
    temperature: Option<f32>,
    seed: Option<u64>,
    client: Client,
}

#[derive(Debug, Serialize)]
struct HfRequest {
    inputs: String,
    parameters: HfParameters,
}

#[derive(Debug, Serialize)]
struct HfParameters {
    max_new_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct HfGeneration {
    generated_text: String,
}

impl HuggingFaceClient {
    pub fn new(
        api_key: String,
        model: String,
        max_new_tokens: u32,
        timeout_secs: u64,
    ) -> Result<Self> {
        Self::with_base_url(
            api_key,
            model,
            "https://api-inference.huggingface.co".to_string(),
            max_new_tokens,
            timeout_secs,
        )
    }

    pub fn with_base_url(
        api_key: String,
        model: String,
        base_url: String,
        max_new_tokens: u32,
        timeout_secs: u64,
    ) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            model,
            base_url,
            max_new_tokens,
            temperature: None,
            seed: None,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .context("failed to build HTTP client")?,
        })
    }

    /// Sampling controls forwarded as `parameters` on each call.
    pub fn with_sampling(mut self, temperature: Option<f32>, seed: Option<u64>) -> Self {
        self.temperature = temperature;
        self.seed = seed;
        self
    }
}

#[async_trait]
impl LlmClient for HuggingFaceClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = HfRequest {
            inputs: prompt.to_string(),
            parameters: HfParameters {
                max_new_tokens: self.max_new_tokens,
                temperature: self.temperature,
                seed: self.seed,
                // Must stay off: an echoed prompt would put the template's
                // own ```json fence ahead of the model's answer.
                return_full_text: false,
            },
        };

        debug!("Calling Hugging Face Inference API with model: {}", self.model);

        let url = format!("{}/models/{}", self.base_url, self.model);

        let mut req = self.client.post(&url).json(&request);
        if !self.api_key.is_empty() {
            req = req.header("authorization", format!("Bearer {}", self.api_key.expose()));
        }

        let response = req
            .send()
            .await
            .context("Failed to send request to Hugging Face Inference API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            bail!("Hugging Face API error {}: {}", status, error_text);
        }

        let generations: Vec<HfGeneration> = response
            .json()
            .await
            .context("Failed to parse Hugging Face API response")?;

        generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .context("No generations in Hugging Face response")
    }
}

// ============================================================================
// Anthropic Client
// ============================================================================

pub struct AnthropicClient {
    api_key: SecretString,
    model: String,
    max_tokens: u32,
    temperature: Option<f32>,
    client: Client,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    text: String,
}

impl AnthropicClient {
    pub fn new(api_key: String, model: String, max_tokens: u32, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            model,
            max_tokens,
            temperature: None,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .context("failed to build HTTP client")?,
        })
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        debug!("Calling Anthropic API with model: {}", self.model);

        let response = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", self.api_key.expose())
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Anthropic API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            bail!("Anthropic API error {}: {}", status, error_text);
        }

        let api_response: AnthropicResponse = response
            .json()
            .await
            .context("Failed to parse Anthropic API response")?;

        api_response
            .content
            .first()
            .map(|c| c.text.clone())
            .context("No content in Anthropic response")
    }
}

// ============================================================================
// OpenAI / OpenAI-compatible Client
// ============================================================================

pub struct OpenAIClient {
    api_key: SecretString,
    model: String,
    base_url: String,
    max_tokens: u32,
    temperature: Option<f32>,
    client: Client,
}

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

impl OpenAIClient {
    pub fn new(api_key: String, model: String, max_tokens: u32, timeout_secs: u64) -> Result<Self> {
        Self::with_base_url(
            api_key,
            model,
            "https://api.openai.com/v1".to_string(),
            max_tokens,
            timeout_secs,
        )
    }

    pub fn with_base_url(
        api_key: String,
        model: String,
        base_url: String,
        max_tokens: u32,
        timeout_secs: u64,
    ) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            model,
            base_url,
            max_tokens,
            temperature: None,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .context("failed to build HTTP client")?,
        })
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        // GPT-5+ models use max_completion_tokens instead of max_tokens
        let (max_tokens, max_completion_tokens) = if self.model.starts_with("gpt-5") {
            (None, Some(self.max_tokens))
        } else {
            (Some(self.max_tokens), None)
        };

        let request = OpenAIRequest {
            model: self.model.clone(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
            max_tokens,
            max_completion_tokens,
        };

        debug!(
            "Calling OpenAI-compatible API at {} with model: {}",
            self.base_url, self.model
        );

        let url = format!("{}/chat/completions", self.base_url);

        let mut req = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&request);

        // Local gateways run without a key
        if !self.api_key.is_empty() {
            req = req.header("authorization", format!("Bearer {}", self.api_key.expose()));
        }

        let response = req
            .send()
            .await
            .context("Failed to send request to OpenAI API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            bail!("OpenAI API error {}: {}", status, error_text);
        }

        let api_response: OpenAIResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI API response")?;

        api_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .context("No choices in OpenAI response")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hf_client_creation() {
        let client = HuggingFaceClient::new(
            "test_key".to_string(),
            "meta-llama/Meta-Llama-3-70B-Instruct".to_string(),
            2000,
            120,
        )
        .unwrap();
        assert_eq!(client.api_key.expose(), "test_key");
        assert_eq!(client.model, "meta-llama/Meta-Llama-3-70B-Instruct");
        assert_eq!(client.base_url, "https://api-inference.huggingface.co");
    }

    #[test]
    fn test_hf_request_structure() {
        let request = HfRequest {
            inputs: "test prompt".to_string(),
            parameters: HfParameters {
                max_new_tokens: 2000,
                temperature: Some(0.7),
                seed: Some(42),
                return_full_text: false,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["inputs"], "test prompt");
        assert_eq!(json["parameters"]["max_new_tokens"], 2000);
        assert_eq!(json["parameters"]["seed"], 42);
        assert_eq!(json["parameters"]["return_full_text"], false);
    }

    #[test]
    fn test_hf_request_omits_unset_sampling() {
        let request = HfRequest {
            inputs: "test".to_string(),
            parameters: HfParameters {
                max_new_tokens: 500,
                temperature: None,
                seed: None,
                return_full_text: false,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json["parameters"].get("temperature").is_none());
        assert!(json["parameters"].get("seed").is_none());
    }

    #[test]
    fn test_hf_response_parsing() {
        let json = r#"[{"generated_text": "Hello, world!"}]"#;
        let generations: Vec<HfGeneration> = serde_json::from_str(json).unwrap();
        assert_eq!(generations[0].generated_text, "Hello, world!");
    }

    #[test]
    fn test_hf_response_empty() {
        let generations: Vec<HfGeneration> = serde_json::from_str("[]").unwrap();
        assert!(generations.is_empty());
    }

    #[test]
    fn test_hf_client_with_sampling() {
        let client = HuggingFaceClient::new("key".to_string(), "m".to_string(), 2000, 60)
            .unwrap()
            .with_sampling(Some(0.7), Some(42));
        assert_eq!(client.seed, Some(42));
        let temp = client.temperature.unwrap();
        assert!((temp - 0.7).abs() < 0.0001);
    }

    #[test]
    fn test_anthropic_client_creation() {
        let client =
            AnthropicClient::new("test_key".to_string(), "claude-3".to_string(), 4096, 120)
                .unwrap();
        assert_eq!(client.api_key.expose(), "test_key");
        assert_eq!(client.model, "claude-3");
    }

    #[test]
    fn test_anthropic_request_structure() {
        let request = AnthropicRequest {
            model: "claude-3".to_string(),
            max_tokens: 4096,
            temperature: None,
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: "test".to_string(),
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "claude-3");
        assert_eq!(json["max_tokens"], 4096);
        assert!(json.get("temperature").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_anthropic_response_parsing() {
        let json = r#"{
            "content": [
                {"type": "text", "text": "Hello, world!"}
            ]
        }"#;

        let response: AnthropicResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.content[0].text, "Hello, world!");
    }

    #[test]
    fn test_openai_client_creation() {
        let client =
            OpenAIClient::new("test_key".to_string(), "gpt-4o".to_string(), 4096, 120).unwrap();
        assert_eq!(client.api_key.expose(), "test_key");
        assert_eq!(client.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_openai_client_with_custom_base_url() {
        let client = OpenAIClient::with_base_url(
            "test_key".to_string(),
            "llama3".to_string(),
            "http://localhost:11434/v1".to_string(),
            16384,
            120,
        )
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:11434/v1");
    }

    #[test]
    fn test_openai_request_gpt5_uses_max_completion_tokens() {
        let model = "gpt-5-turbo";
        let (max_tokens, max_completion_tokens) = if model.starts_with("gpt-5") {
            (None, Some(4096u32))
        } else {
            (Some(4096u32), None)
        };

        let request = OpenAIRequest {
            model: model.to_string(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: "test".to_string(),
            }],
            temperature: Some(0.7),
            max_tokens,
            max_completion_tokens,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert_eq!(json["max_completion_tokens"], 4096);
    }

    #[test]
    fn test_openai_response_parsing() {
        let json = r#"{
            "choices": [
                {
                    "message": {
                        "role": "assistant",
                        "content": "Hello, world!"
                    }
                }
            ]
        }"#;

        let response: OpenAIResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content, "Hello, world!");
    }

    #[test]
    fn test_empty_api_key_accepted() {
        let client =
            HuggingFaceClient::new("".to_string(), "local-model".to_string(), 2000, 120).unwrap();
        assert!(client.api_key.is_empty());
    }
}
