//! Per-image alt-text generation with bounded rate-limit retry.
//!
//! The generator reads one image, encodes it, and drives the captioning
//! call. Every failure is captured and converted to an explicit outcome
//! value, so one image can never abort a batch.

use super::provider::{CaptionProvider, CaptionRequest, ImageInput};
use super::retry;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for the generator.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Additional attempts after the first rate-limited failure
    pub retry_attempts: u32,
    /// Backoff base in milliseconds; the nth retry waits `base * n`
    pub backoff_base_ms: u64,
    /// Output token budget per caption
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 60_000,
            retry_attempts: 2,
            backoff_base_ms: 5000,
            max_tokens: 80,
            temperature: 0.2,
        }
    }
}

/// Outcome of captioning a single image.
///
/// Failure is a value, not an exception: callers can tell "no text"
/// (`Failed`) apart from "empty text" (`Generated` with an empty string).
#[derive(Debug)]
pub enum CaptionOutcome {
    Generated { path: PathBuf, text: String },
    Failed { path: PathBuf, message: String },
}

impl CaptionOutcome {
    /// The image path this outcome belongs to.
    pub fn path(&self) -> &Path {
        match self {
            CaptionOutcome::Generated { path, .. } => path,
            CaptionOutcome::Failed { path, .. } => path,
        }
    }
}

/// Alt-text generator for single images.
pub struct AltTextGenerator {
    provider: Arc<dyn CaptionProvider>,
    options: GeneratorOptions,
}

impl AltTextGenerator {
    pub fn new(provider: Box<dyn CaptionProvider>, options: GeneratorOptions) -> Self {
        Self {
            provider: Arc::from(provider),
            options,
        }
    }

    /// Generate alt text for one image.
    ///
    /// Rate-limited calls are retried up to `retry_attempts` more times
    /// with linear backoff. Any other error fails immediately. All
    /// failures are logged here and returned as `CaptionOutcome::Failed`.
    pub async fn generate(&self, path: &Path) -> CaptionOutcome {
        let image_bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                return self.fail(path, format!("Failed to read image: {e}"));
            }
        };

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let image = ImageInput::from_bytes(&image_bytes, extension);
        let request =
            CaptionRequest::alt_text(image, self.options.max_tokens, self.options.temperature);

        let mut last_error = String::new();
        for attempt in 0..=self.options.retry_attempts {
            if attempt > 0 {
                let delay = retry::backoff_duration(attempt, self.options.backoff_base_ms);
                tracing::debug!(
                    "Rate limited, retry {attempt}/{} for {:?} after {delay:?}",
                    self.options.retry_attempts,
                    path
                );
                tokio::time::sleep(delay).await;
            }

            match tokio::time::timeout(
                Duration::from_millis(self.options.timeout_ms),
                self.provider.generate(&request),
            )
            .await
            {
                Ok(Ok(response)) => {
                    return CaptionOutcome::Generated {
                        path: path.to_path_buf(),
                        text: response.text.trim().to_string(),
                    };
                }
                Ok(Err(e)) => {
                    last_error = e.to_string();
                    if !retry::is_rate_limited(&e) {
                        break;
                    }
                }
                Err(_) => {
                    last_error = format!("Timeout after {}ms", self.options.timeout_ms);
                    break;
                }
            }
        }

        self.fail(path, last_error)
    }

    fn fail(&self, path: &Path, message: String) -> CaptionOutcome {
        tracing::error!("Alt text generation failed for {:?}: {message}", path);
        CaptionOutcome::Failed {
            path: path.to_path_buf(),
            message,
        }
    }
}
