//! Captioning provider trait and request/response types.

use crate::error::CaptionError;
use async_trait::async_trait;
use base64::Engine;
use std::time::Duration;

/// System instruction for every captioning call.
const SYSTEM_INSTRUCTION: &str =
    "You are a helpful assistant specialized in creating accessible alt text for images.";

/// User instruction text sent alongside the encoded image.
const ALT_TEXT_INSTRUCTION: &str = "Generate a concise and descriptive alt text for this image. \
     If the image is a screenshot of a digital interface (such as a website, app, or software tool), \
     describe the main area, key visible options or buttons, and any highlighted elements. \
     Focus on what a user would need to understand without seeing it. \
     Keep the description under 300 characters.";

/// Base64-encoded image ready to send to a captioning API.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub media_type: String,
}

impl ImageInput {
    /// Create an `ImageInput` from raw bytes and a file extension.
    ///
    /// The MIME type is inferred from the extension; unrecognized
    /// extensions fall back to `image/jpeg`.
    pub fn from_bytes(bytes: &[u8], extension: &str) -> Self {
        let media_type = match extension.to_lowercase().as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            other => {
                tracing::warn!("Unknown image extension '{other}', defaulting to image/jpeg");
                "image/jpeg"
            }
        };

        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: media_type.to_string(),
        }
    }

    /// Return a data URL suitable for OpenAI-style APIs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// A request to generate alt text for one image.
#[derive(Debug, Clone)]
pub struct CaptionRequest {
    /// The image to describe
    pub image: ImageInput,
    /// System instruction
    pub system: String,
    /// User instruction text
    pub prompt: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl CaptionRequest {
    /// Build the fixed alt-text request for an image.
    pub fn alt_text(image: ImageInput, max_tokens: u32, temperature: f32) -> Self {
        Self {
            image,
            system: SYSTEM_INSTRUCTION.to_string(),
            prompt: ALT_TEXT_INSTRUCTION.to_string(),
            max_tokens,
            temperature,
        }
    }
}

/// The response from a captioning call.
#[derive(Debug, Clone)]
pub struct CaptionResponse {
    /// Generated alt text
    pub text: String,
    /// Model identifier used
    pub model: String,
    /// Number of tokens used (input + output), if reported
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait that captioning providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn CaptionProvider>` for dynamic dispatch, and mock
/// providers in tests).
#[async_trait]
pub trait CaptionProvider: Send + Sync {
    /// Provider name for logging (e.g., "openai").
    fn name(&self) -> &str;

    /// Check whether the provider is configured.
    async fn is_available(&self) -> bool;

    /// Generate alt text for the given request.
    async fn generate(&self, request: &CaptionRequest) -> Result<CaptionResponse, CaptionError>;

    /// Per-request timeout for this provider.
    fn timeout(&self) -> Duration;
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok()
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
