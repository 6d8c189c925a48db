//! Sequential batch orchestration: locate images, caption each one, write
//! the report incrementally.
//!
//! One image is in flight at a time. The only suspension points are the
//! captioning call itself and the fixed inter-image pause, which is a
//! proactive throttle tuned independently from the retry backoff.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::discovery::ImageLocator;
use crate::error::Result;
use crate::llm::{AltTextGenerator, CaptionOutcome};
use crate::report::MarkdownReport;

/// Configuration for the batch runner.
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// Fixed pause between images in milliseconds
    pub image_delay_ms: u64,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            image_delay_ms: 2000,
        }
    }
}

/// Counters for a completed run. `succeeded + failed == total` always.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Result of a completed run: counters plus the per-path caption mapping.
#[derive(Debug)]
pub struct BatchOutcome {
    pub stats: RunStats,
    pub results: BTreeMap<PathBuf, String>,
}

/// Sequential batch runner.
pub struct BatchRunner {
    locator: ImageLocator,
    generator: AltTextGenerator,
    options: RunnerOptions,
}

impl BatchRunner {
    pub fn new(locator: ImageLocator, generator: AltTextGenerator, options: RunnerOptions) -> Self {
        Self {
            locator,
            generator,
            options,
        }
    }

    /// Run end-to-end: locate, caption, report.
    ///
    /// A missing root directory is the only fatal condition and aborts
    /// before the report file is created. Per-image failures are absorbed
    /// into the counters; rows are written only for successes. `on_result`
    /// is invoked after each image so callers can drive progress display.
    pub async fn run<F>(&self, root: &Path, report_path: &Path, on_result: F) -> Result<BatchOutcome>
    where
        F: Fn(&CaptionOutcome),
    {
        let files = self.locator.locate(root)?;
        tracing::info!("Found {} image(s) to process", files.len());

        let report = MarkdownReport::create(report_path)?;

        let total = files.len();
        let mut results = BTreeMap::new();

        for (index, path) in files.iter().enumerate() {
            tracing::info!("Processing {}/{}: {:?}", index + 1, total, path);

            let outcome = self.generator.generate(path).await;
            if let CaptionOutcome::Generated { text, .. } = &outcome {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                report.append_row(&file_name, text)?;
                results.insert(path.clone(), text.clone());
            }
            on_result(&outcome);

            if index + 1 < total && self.options.image_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.options.image_delay_ms)).await;
            }
        }

        let succeeded = results.len();
        let stats = RunStats {
            total,
            succeeded,
            failed: total - succeeded,
        };
        report.append_summary(stats.total, stats.succeeded, stats.failed)?;

        Ok(BatchOutcome { stats, results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AltTextError, CaptionError};
    use crate::llm::{CaptionProvider, CaptionRequest, CaptionResponse, GeneratorOptions};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Stub provider driven by a closure over the request-independent call.
    struct StubProvider<F>(F);

    #[async_trait]
    impl<F> CaptionProvider for StubProvider<F>
    where
        F: Fn() -> std::result::Result<String, CaptionError> + Send + Sync,
    {
        fn name(&self) -> &str {
            "stub"
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn generate(
            &self,
            _request: &CaptionRequest,
        ) -> std::result::Result<CaptionResponse, CaptionError> {
            (self.0)().map(|text| CaptionResponse {
                text,
                model: "stub-v1".to_string(),
                tokens_used: None,
                latency_ms: 1,
            })
        }

        fn timeout(&self) -> Duration {
            Duration::from_secs(5)
        }
    }

    fn test_runner<F>(stub: F) -> BatchRunner
    where
        F: Fn() -> std::result::Result<String, CaptionError> + Send + Sync + 'static,
    {
        let locator = ImageLocator::new(&[
            ".jpg".to_string(),
            ".jpeg".to_string(),
            ".png".to_string(),
            ".gif".to_string(),
            ".webp".to_string(),
        ]);
        let generator = AltTextGenerator::new(
            Box::new(StubProvider(stub)),
            GeneratorOptions {
                timeout_ms: 5000,
                retry_attempts: 2,
                backoff_base_ms: 1,
                max_tokens: 80,
                temperature: 0.2,
            },
        );
        // No pacing in tests
        BatchRunner::new(locator, generator, RunnerOptions { image_delay_ms: 0 })
    }

    #[tokio::test]
    async fn test_single_image_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("photo.png"), [0x89, 0x50]).unwrap();
        let report_path = dir.path().join("alt_text_results.md");

        let runner = test_runner(|| Ok("A red bicycle.".to_string()));
        let outcome = runner
            .run(dir.path(), &report_path, |_| {})
            .await
            .unwrap();

        assert_eq!(
            outcome.stats,
            RunStats {
                total: 1,
                succeeded: 1,
                failed: 0
            }
        );
        assert_eq!(
            outcome.results.get(&dir.path().join("photo.png")),
            Some(&"A red bicycle.".to_string())
        );

        let content = std::fs::read_to_string(&report_path).unwrap();
        assert!(content.contains("| photo.png | A red bicycle. |"));
        assert!(content.contains("- Total images processed: 1"));
        assert!(content.contains("- Successfully generated alt text: 1"));
        assert!(content.contains("- Failed: 0"));
    }

    #[tokio::test]
    async fn test_empty_folder_writes_zero_summary() {
        let dir = tempfile::tempdir().unwrap();
        let report_path = dir.path().join("report.md");

        let runner = test_runner(|| Ok("unused".to_string()));
        let outcome = runner
            .run(dir.path(), &report_path, |_| {})
            .await
            .unwrap();

        assert_eq!(
            outcome.stats,
            RunStats {
                total: 0,
                succeeded: 0,
                failed: 0
            }
        );
        assert!(outcome.results.is_empty());

        let content = std::fs::read_to_string(&report_path).unwrap();
        assert!(content.contains("| Image File | Alt Text |"));
        assert!(content.contains("- Total images processed: 0"));
        assert!(content.contains("- Successfully generated alt text: 0"));
        assert!(content.contains("- Failed: 0"));
        // Header and summary only, no data rows
        let data_rows = content
            .lines()
            .filter(|l| l.starts_with('|'))
            .filter(|l| !l.contains("Image File") && !l.contains("---"))
            .count();
        assert_eq!(data_rows, 0);
    }

    #[tokio::test]
    async fn test_failures_counted_but_not_written() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("b.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("c.jpg"), b"x").unwrap();
        let report_path = dir.path().join("report.md");

        // Locator order is sorted, so the second image is b.jpg
        let calls = Mutex::new(0u32);
        let runner = test_runner(move || {
            let mut calls = calls.lock().unwrap();
            *calls += 1;
            if *calls == 2 {
                Err(CaptionError::Llm {
                    message: "HTTP 400: bad request".to_string(),
                    status_code: Some(400),
                })
            } else {
                Ok(format!("Caption {}", *calls))
            }
        });
        let outcome = runner
            .run(dir.path(), &report_path, |_| {})
            .await
            .unwrap();

        assert_eq!(
            outcome.stats,
            RunStats {
                total: 3,
                succeeded: 2,
                failed: 1
            }
        );
        assert_eq!(outcome.stats.succeeded + outcome.stats.failed, outcome.stats.total);

        let content = std::fs::read_to_string(&report_path).unwrap();
        assert!(content.contains("| a.jpg |"));
        assert!(!content.contains("| b.jpg |"));
        assert!(content.contains("| c.jpg |"));
    }

    #[tokio::test]
    async fn test_pipe_characters_escaped_in_rows() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ui.png"), b"x").unwrap();
        let report_path = dir.path().join("report.md");

        let runner = test_runner(|| Ok("Sidebar | main panel".to_string()));
        runner.run(dir.path(), &report_path, |_| {}).await.unwrap();

        let content = std::fs::read_to_string(&report_path).unwrap();
        assert!(content.contains("| ui.png | Sidebar \\| main panel |"));
    }

    #[tokio::test]
    async fn test_missing_root_aborts_before_report_creation() {
        let dir = tempfile::tempdir().unwrap();
        let report_path = dir.path().join("report.md");

        let runner = test_runner(|| Ok("unused".to_string()));
        let result = runner
            .run(&dir.path().join("missing"), &report_path, |_| {})
            .await;

        assert!(matches!(
            result,
            Err(AltTextError::Caption(CaptionError::RootNotFound(_)))
        ));
        assert!(!report_path.exists());
    }

    #[tokio::test]
    async fn test_callback_sees_every_outcome() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("b.jpg"), b"x").unwrap();
        let report_path = dir.path().join("report.md");

        let seen = Mutex::new(Vec::new());
        let runner = test_runner(|| {
            Err(CaptionError::Llm {
                message: "boom".to_string(),
                status_code: Some(500),
            })
        });
        runner
            .run(dir.path(), &report_path, |outcome| {
                seen.lock().unwrap().push(outcome.path().to_path_buf());
            })
            .await
            .unwrap();

        assert_eq!(seen.lock().unwrap().len(), 2);
    }
}
