use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod generator;
mod llm;
mod renderer;
mod request;
mod specification;
mod util;
mod validator;

#[derive(Parser)]
#[command(name = "promptforge", version)]
#[command(about = "Generate structured AI prompt specifications from a statement of intent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a prompt specification for an intent
    Generate {
        /// What the prompt should accomplish (e.g., "write an article", "analyze sentiment")
        intent: String,

        /// Example inputs and outputs to guide the model
        #[arg(long)]
        examples: Option<String>,

        /// Additional context to guide the model
        #[arg(long)]
        context: Option<String>,

        /// Constraints or restrictions the prompt must respect
        #[arg(long)]
        constraints: Option<String>,

        /// Output file path
        #[arg(short = 'o', long, default_value = renderer::DEFAULT_OUTPUT_FILE)]
        output: String,

        /// Print the document without writing a file
        #[arg(long)]
        print_only: bool,

        /// Path to config file (defaults to ~/.config/promptforge/config.toml or ./promptforge.toml)
        #[arg(long)]
        config: Option<String>,

        /// Override LLM provider (hf, anthropic, openai, openai-compatible)
        #[arg(long)]
        provider: Option<String>,

        /// Override LLM model (must be servable by the provider)
        #[arg(long)]
        model: Option<String>,

        /// Use mock LLM client for testing
        #[arg(long)]
        dry_run: bool,
    },

    /// List the models each provider can serve
    Models {
        /// Limit the listing to one provider
        #[arg(long)]
        provider: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            intent,
            examples,
            context,
            constraints,
            output,
            print_only,
            config,
            provider,
            model,
            dry_run,
        } => {
            cli::generate::run(
                intent,
                examples,
                context,
                constraints,
                output,
                print_only,
                config,
                provider,
                model,
                dry_run,
            )
            .await?;
        }
        Commands::Models { provider } => {
            cli::models::run(provider)?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "promptforge",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}
