//! alttext-core - Embeddable batch alt-text generation library.
//!
//! alttext walks a folder of images, asks a multimodal LLM for an
//! accessible description of each one, and appends the results to a
//! Markdown table report as they arrive.
//!
//! # Architecture
//!
//! ```text
//! Folder → Locate → Encode (base64 data URL) → Caption (LLM, bounded retry) → Report row
//! ```
//!
//! Processing is strictly sequential — one image in flight at a time, with
//! a fixed pause between images to stay under provider rate limits.
//!
//! # Usage
//!
//! ```rust,ignore
//! use alttext_core::{
//!     AltTextGenerator, BatchRunner, Config, GeneratorOptions, ImageLocator, OpenAiProvider,
//!     RunnerOptions,
//! };
//!
//! #[tokio::main]
//! async fn main() -> alttext_core::Result<()> {
//!     let config = Config::load()?;
//!     let locator = ImageLocator::new(&config.processing.extensions);
//!     let provider = OpenAiProvider::new("sk-...", &config.llm.openai.model);
//!     let generator = AltTextGenerator::new(Box::new(provider), GeneratorOptions::default());
//!     let runner = BatchRunner::new(locator, generator, RunnerOptions::default());
//!
//!     let outcome = runner
//!         .run("./photos".as_ref(), "alt_text_results.md".as_ref(), |_| {})
//!         .await?;
//!     println!("{} of {} captioned", outcome.stats.succeeded, outcome.stats.total);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod discovery;
pub mod error;
pub mod llm;
pub mod report;
pub mod runner;

// Re-exports for convenient access
pub use config::Config;
pub use discovery::ImageLocator;
pub use error::{AltTextError, CaptionError, CaptionResult, ConfigError, Result};
pub use llm::{
    resolve_env_var, AltTextGenerator, CaptionOutcome, CaptionProvider, GeneratorOptions,
    OpenAiProvider,
};
pub use report::MarkdownReport;
pub use runner::{BatchOutcome, BatchRunner, RunStats, RunnerOptions};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
