//! End-to-end execution of a captioning run with progress reporting.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use alttext_core::{
    resolve_env_var, AltTextGenerator, BatchRunner, Config, GeneratorOptions, ImageLocator,
    OpenAiProvider, RunStats, RunnerOptions,
};

use crate::Cli;

/// Execute a captioning run.
pub async fn execute(args: Cli, config: Config) -> anyhow::Result<()> {
    // ~ expansion on the folder argument
    let folder = PathBuf::from(shellexpand::tilde(&args.folder.to_string_lossy()).into_owned());

    // CLI extension list overrides the config
    let extensions = parse_extensions(&args.extensions);
    let locator = if extensions.is_empty() {
        ImageLocator::new(&config.processing.extensions)
    } else {
        ImageLocator::new(&extensions)
    };

    let api_key = resolve_env_var(&config.llm.openai.api_key).ok_or_else(|| {
        anyhow::anyhow!("OpenAI API key not set. Set the OPENAI_API_KEY env var.")
    })?;
    let model = args
        .model
        .as_deref()
        .unwrap_or(&config.llm.openai.model);
    let provider =
        OpenAiProvider::with_endpoint(&api_key, model, &config.llm.openai.endpoint);

    let generator = AltTextGenerator::new(
        Box::new(provider),
        GeneratorOptions {
            timeout_ms: config.limits.llm_timeout_ms,
            retry_attempts: config.retry.attempts,
            backoff_base_ms: config.retry.backoff_base_ms,
            max_tokens: config.llm.max_tokens,
            temperature: config.llm.temperature,
        },
    );
    let runner = BatchRunner::new(
        locator,
        generator,
        RunnerOptions {
            image_delay_ms: config.pacing.image_delay_ms,
        },
    );

    // Spinner rather than a bar: the runner owns discovery, so the total
    // isn't known here until the run completes.
    let progress = create_spinner();
    let processed = Arc::new(AtomicU64::new(0));

    let outcome = {
        let progress = progress.clone();
        let processed = processed.clone();
        runner
            .run(&folder, &args.output, move |outcome| {
                let done = processed.fetch_add(1, Ordering::SeqCst) + 1;
                let name = outcome
                    .path()
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                progress.set_message(format!("{done} processed (last: {name})"));
                progress.tick();
            })
            .await?
    };

    progress.finish_and_clear();
    print_summary(&outcome.stats);
    tracing::info!("Results saved to {:?}", args.output);

    Ok(())
}

/// Split a comma-separated extension list, dropping empty entries.
fn parse_extensions(list: &str) -> Vec<String> {
    list.split(',')
        .map(|ext| ext.trim().to_string())
        .filter(|ext| !ext.is_empty())
        .collect()
}

/// Create a spinner for sequential batch progress.
fn create_spinner() -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message("starting...");
    pb
}

/// Print a formatted summary table after the run.
fn print_summary(stats: &RunStats) {
    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Succeeded:    {:>8}", stats.succeeded);
    if stats.failed > 0 {
        eprintln!("    Failed:       {:>8}", stats.failed);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Total:        {:>8}", stats.total);
    eprintln!("  ====================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extensions() {
        assert_eq!(
            parse_extensions(".jpg,.jpeg,.png"),
            vec![".jpg", ".jpeg", ".png"]
        );
    }

    #[test]
    fn test_parse_extensions_trims_and_drops_empties() {
        assert_eq!(parse_extensions(" .jpg , ,.png,"), vec![".jpg", ".png"]);
    }

    #[test]
    fn test_parse_extensions_empty_input() {
        assert!(parse_extensions("").is_empty());
        assert!(parse_extensions(" , ,").is_empty());
    }
}
