use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Models each hosted provider can actually serve. The selection UI in an
/// earlier version of this tool offered identifiers the configured endpoint
/// could not invoke; keeping the list per provider makes that mismatch a
/// configuration error instead of a runtime surprise.
///
/// `openai-compatible` is intentionally absent: local gateways serve
/// arbitrary model names, so anything goes there.
static SERVABLE_MODELS: Lazy<BTreeMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    BTreeMap::from([
        (
            "hf",
            vec![
                "meta-llama/Meta-Llama-3-70B-Instruct",
                "meta-llama/Meta-Llama-3-8B-Instruct",
                "mistralai/Mixtral-8x7B-Instruct-v0.1",
                "Qwen/Qwen2.5-72B-Instruct",
            ],
        ),
        (
            "anthropic",
            vec!["claude-sonnet-4-20250514", "claude-3-5-haiku-20241022"],
        ),
        ("openai", vec!["gpt-4o", "gpt-4o-mini"]),
    ])
});

pub fn servable_models(provider: &str) -> Option<&'static [&'static str]> {
    SERVABLE_MODELS.get(provider).map(|models| models.as_slice())
}

pub fn known_providers() -> impl Iterator<Item = &'static str> {
    SERVABLE_MODELS
        .keys()
        .copied()
        .chain(std::iter::once("openai-compatible"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>, // For OpenAI-compatible APIs

    /// Optional: override the generation length budget.
    /// Defaults to 2000 new tokens, enough for a full specification.
    #[serde(default)]
    pub max_new_tokens: Option<u32>,
}

impl LlmConfig {
    pub fn get_max_new_tokens(&self) -> u32 {
        self.max_new_tokens.unwrap_or(2000)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature forwarded to providers that accept one.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Fixed sampling seed for reproducible generations (hf only).
    #[serde(default = "default_seed")]
    pub seed: Option<u64>,

    /// HTTP timeout for the inference call, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            seed: default_seed(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_temperature() -> f32 {
    0.7
}

fn default_seed() -> Option<u64> {
    Some(42)
}

fn default_timeout() -> u64 {
    120
}

impl Config {
    /// Load config from repo root or user config directory
    #[allow(dead_code)]
    pub fn load() -> Result<Self> {
        Self::load_with_path(None)
    }

    /// Load configuration from a specific path, or use default search paths
    pub fn load_with_path(path: Option<String>) -> Result<Self> {
        // If explicit path provided, use it
        if let Some(config_path) = path {
            debug!("Loading config from explicit path: {}", config_path);
            return Self::load_from_path(&config_path);
        }

        // Try the working directory first (per-project config)
        if let Ok(config) = Self::load_from_path("promptforge.toml") {
            debug!("Loaded config from ./promptforge.toml");
            return Ok(config);
        }

        // Try user config directory
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("promptforge").join("config.toml");
            if let Ok(config) = Self::load_from_path(&config_path) {
                debug!("Loaded config from {:?}", config_path);
                return Ok(config);
            }
        }

        // Return defaults
        debug!("Using default config");
        Ok(Self::default())
    }

    fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Check the selected model is one the selected provider can serve.
    pub fn validate_model(&self) -> Result<()> {
        if !known_providers().any(|p| p == self.llm.provider) {
            bail!("Unknown LLM provider: {}", self.llm.provider);
        }
        if let Some(models) = servable_models(&self.llm.provider) {
            if !models.contains(&self.llm.model.as_str()) {
                bail!(
                    "Model `{}` is not servable by the `{}` provider (allowed: {})",
                    self.llm.model,
                    self.llm.provider,
                    models.join(", ")
                );
            }
        }
        Ok(())
    }

    /// Get API key from environment variable specified in config
    pub fn get_api_key(&self) -> Result<String> {
        match &self.llm.api_key_env {
            Some(env_var) => {
                // Special case: "none" means no API key needed (e.g., a local gateway)
                if env_var.to_lowercase() == "none" {
                    return Ok(String::new());
                }

                // openai-compatible: try env var but don't error if missing
                // (local models don't need keys, hosted gateways do)
                if self.llm.provider == "openai-compatible" {
                    return Ok(env::var(env_var).unwrap_or_default());
                }

                env::var(env_var).map_err(|_| {
                    anyhow::anyhow!("API key not found in environment variable: {}", env_var)
                })
            }
            None => Ok(String::new()), // No API key needed
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                provider: "hf".to_string(),
                model: "meta-llama/Meta-Llama-3-70B-Instruct".to_string(),
                api_key_env: Some("HF_API_KEY".to_string()),
                base_url: None,
                max_new_tokens: None,
            },
            generation: GenerationConfig::default(),
        }
    }
}
