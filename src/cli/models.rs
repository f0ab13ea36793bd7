use anyhow::{bail, Result};

use crate::config::{known_providers, servable_models};

/// Print the provider/model allow-list, optionally filtered to one provider.
pub fn run(provider: Option<String>) -> Result<()> {
    match provider {
        Some(provider) => {
            if !known_providers().any(|p| p == provider) {
                bail!("Unknown LLM provider: {}", provider);
            }
            print_provider(&provider);
        }
        None => {
            for provider in known_providers() {
                print_provider(provider);
            }
        }
    }
    Ok(())
}

fn print_provider(provider: &str) {
    println!("{provider}:");
    match servable_models(provider) {
        Some(models) => {
            for model in models {
                println!("  {model}");
            }
        }
        None => println!("  (any model identifier the gateway serves)"),
    }
}
