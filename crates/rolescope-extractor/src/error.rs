//! Error types for the extraction pipeline

use thiserror::Error;

/// Errors that can occur while turning model output into a validated record.
///
/// Every variant is terminal for a single pipeline invocation: the pipeline
/// either fully succeeds with one record or fails with exactly one of these.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// No candidate JSON object could be located in the text
    #[error("no JSON object found in model output")]
    MalformedInput,

    /// Both the strict parse and the single repaired retry failed
    #[error("invalid JSON from model: {original} (after repair: {repaired})")]
    InvalidJson {
        /// Diagnostic from the strict parse attempt
        original: String,
        /// Diagnostic from the post-repair parse attempt
        repaired: String,
    },

    /// A required canonical field had no matching alternate key
    #[error("missing required field '{0}'")]
    MissingRequiredField(&'static str),

    /// A resolved field's value does not match its declared shape
    #[error("field '{field}' has wrong shape: expected {expected}, got {actual}")]
    SchemaViolation {
        /// Canonical name of the offending field
        field: &'static str,
        /// The shape the schema declares
        expected: &'static str,
        /// The shape actually found in the raw record
        actual: &'static str,
    },
}
