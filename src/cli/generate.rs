use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

use crate::config::Config;
use crate::generator::{GenerateError, PromptGenerator};
use crate::llm::factory;
use crate::renderer;
use crate::request::GenerationRequest;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    intent: String,
    examples: Option<String>,
    context: Option<String>,
    constraints: Option<String>,
    output: String,
    print_only: bool,
    config_path: Option<String>,
    provider_override: Option<String>,
    model_override: Option<String>,
    dry_run: bool,
) -> Result<()> {
    // Load config (explicit path, working directory, or user config dir)
    let mut config = Config::load_with_path(config_path)?;

    // Apply CLI overrides
    if let Some(ref provider) = provider_override {
        info!("CLI override: provider = {}", provider);
        config.llm.provider = provider.clone();
    }
    if let Some(ref model) = model_override {
        info!("CLI override: model = {}", model);
        config.llm.model = model.clone();
    }

    // Reject provider/model mismatches before any network traffic
    config.validate_model()?;

    let request = GenerationRequest::new(intent)?
        .with_examples(examples)
        .with_context(context)
        .with_constraints(constraints);

    let client = factory::create_client(&config, dry_run)?;
    if dry_run {
        info!("Using mock LLM client");
    } else {
        info!(
            "Using {} provider with model {}",
            config.llm.provider, config.llm.model
        );
    }

    let generator = PromptGenerator::new(client);
    match generator.generate(&request).await {
        Ok(spec) => {
            let document = renderer::render(&spec);
            println!("{document}");
            if !print_only {
                renderer::save_document(&document, Path::new(&output))?;
            }
            Ok(())
        }
        Err(err) => {
            // Surface the raw completion so the user can tell whether the
            // template, the fence convention, or the model was at fault.
            if let GenerateError::Validation(ref validation) = err {
                warn!("Model response failed validation: {validation}");
                warn!("Raw model response:\n{}", validation.raw_response());
            }
            Err(err.into())
        }
    }
}
