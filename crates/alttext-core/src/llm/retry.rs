//! Retry utilities for rate-limited captioning calls.
//!
//! Only rate limits are retried; every other error class fails the image
//! on the first attempt.

use crate::error::CaptionError;
use std::time::Duration;

/// Determine whether a caption error is a rate-limit condition.
///
/// Classifies by HTTP status code (429) when one is available. Errors that
/// carry no status code fall back to substring matching on the message —
/// a compatibility shim for clients that only surface rate limiting in
/// the error text.
pub fn is_rate_limited(error: &CaptionError) -> bool {
    match error {
        CaptionError::Llm {
            status_code,
            message,
        } => {
            if let Some(code) = status_code {
                return *code == 429;
            }
            message.to_lowercase().contains("rate limit")
        }
        _ => false,
    }
}

/// Calculate the backoff duration before the nth retry.
///
/// Linear schedule: `base_delay * retry`, so with the default 5s base the
/// first retry waits 5s and the second 10s.
pub fn backoff_duration(retry: u32, base_delay_ms: u64) -> Duration {
    Duration::from_millis(base_delay_ms.saturating_mul(retry as u64))
}
