//! Sub-configuration structs with defaults matching the CLI surface.

use serde::{Deserialize, Serialize};

/// Image discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Accepted file-name suffixes (matched case-insensitively)
    pub extensions: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            extensions: vec![
                ".jpg".to_string(),
                ".jpeg".to_string(),
                ".png".to_string(),
                ".gif".to_string(),
                ".webp".to_string(),
            ],
        }
    }
}

/// Pacing between consecutive images.
///
/// This is a proactive throttle and is tuned independently from the
/// reactive retry backoff in [`RetryConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Fixed pause between images in milliseconds
    pub image_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            image_delay_ms: 2000,
        }
    }
}

/// Retry policy for rate-limited captioning calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Additional attempts after the first failure
    pub attempts: u32,

    /// Backoff base in milliseconds; the nth retry waits `base * n`
    pub backoff_base_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: 2,
            backoff_base_ms: 5000,
        }
    }
}

/// Resource limits for the external call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Captioning call timeout in milliseconds
    pub llm_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            llm_timeout_ms: 60000,
        }
    }
}

/// LLM request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Output token budget per caption
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// OpenAI provider settings
    pub openai: OpenAiConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            max_tokens: 80,
            temperature: 0.2,
            openai: OpenAiConfig::default(),
        }
    }
}

/// OpenAI provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key, or `${ENV_VAR}` to read one from the environment
    pub api_key: String,

    /// Model name
    pub model: String,

    /// Chat completions endpoint
    pub endpoint: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: "${OPENAI_API_KEY}".to_string(),
            model: "gpt-4o".to_string(),
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
