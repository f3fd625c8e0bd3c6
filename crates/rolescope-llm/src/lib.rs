//! Rolescope LLM Layer
//!
//! Client for the Gemini `generateContent` REST API. This crate owns
//! everything about talking to the external model: prompt construction, the
//! two-step extract-then-structure flow, timeouts, and retry with backoff.
//!
//! The model's raw text answer is returned as-is; turning it into a
//! validated record is `rolescope-extractor`'s job. This split keeps the
//! parsing pipeline free of network concerns and testable with plain
//! strings.

#![warn(missing_docs)]

pub mod gemini;
pub mod prompt;

use thiserror::Error;

pub use gemini::GeminiClient;

/// Errors that can occur while talking to the model API
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("communication error: {0}")]
    Communication(String),

    /// Response body did not have the expected shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exhausted after retries
    #[error("rate limit exceeded")]
    RateLimitExceeded,
}
