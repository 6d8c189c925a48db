//! alttext CLI - batch-generate accessible alt text for a folder of images.
//!
//! alttext walks a folder, sends each image to a multimodal LLM, and
//! appends the generated descriptions to a Markdown table report.
//!
//! # Usage
//!
//! ```bash
//! # Caption every image under ./photos
//! alttext ./photos
//!
//! # Custom report name and extension filter
//! alttext ./screenshots --output screenshots.md --extensions .png,.webp
//! ```
//!
//! The OpenAI API key is read from the OPENAI_API_KEY environment variable
//! (or whatever the config file's `llm.openai.api_key` points at).

use clap::Parser;
use std::path::PathBuf;

mod cli;
mod logging;

/// alttext - batch alt-text generation for image folders.
#[derive(Parser, Debug)]
#[command(name = "alttext")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Folder containing the images to caption
    #[arg(required = true)]
    pub folder: PathBuf,

    /// Output markdown file name
    #[arg(short, long, default_value = "alt_text_results.md")]
    pub output: PathBuf,

    /// Comma-separated list of accepted image extensions
    #[arg(long, default_value = ".jpg,.jpeg,.png,.gif,.webp")]
    pub extensions: String,

    /// Model name (overrides the config default)
    #[arg(long)]
    pub model: Option<String>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    pub json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI overrides.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match alttext_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Failed to load config: {e}\n  Using default configuration.");
            alttext_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("alttext v{}", alttext_core::VERSION);

    cli::run::execute(cli, config).await
}
