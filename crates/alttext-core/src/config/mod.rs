//! Configuration management for alttext.
//!
//! Configuration is loaded from a platform config directory with sensible
//! defaults. All config structs implement `Default`, so a missing file is
//! not an error.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for alttext.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Image discovery settings
    pub processing: ProcessingConfig,

    /// Inter-image pacing
    pub pacing: PacingConfig,

    /// Rate-limit retry policy
    pub retry: RetryConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// LLM provider settings
    pub llm: LlmConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.alttext.alttext/config.toml
    /// - Linux: ~/.config/alttext/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\alttext\config\config.toml
    ///
    /// Falls back to ~/.alttext/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "alttext", "alttext")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".alttext").join("config.toml")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.processing.extensions.len(), 5);
        assert_eq!(config.pacing.image_delay_ms, 2000);
        assert_eq!(config.retry.attempts, 2);
        assert_eq!(config.retry.backoff_base_ms, 5000);
        assert_eq!(config.limits.llm_timeout_ms, 60000);
        assert_eq!(config.llm.max_tokens, 80);
        assert_eq!(config.llm.openai.model, "gpt-4o");
    }

    #[test]
    fn test_load_from_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            "[retry]\nattempts = 4\n\n[llm.openai]\nmodel = \"gpt-4o-mini\""
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        // Overridden values
        assert_eq!(config.retry.attempts, 4);
        assert_eq!(config.llm.openai.model, "gpt-4o-mini");
        // Untouched sections keep their defaults
        assert_eq!(config.retry.backoff_base_ms, 5000);
        assert_eq!(config.pacing.image_delay_ms, 2000);
    }

    #[test]
    fn test_load_from_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not valid = [toml").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_default_path_points_at_config_toml() {
        let path = Config::default_path();
        assert!(path.ends_with("config.toml"));
    }
}
