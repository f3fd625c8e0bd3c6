//! Rolescope Extractor
//!
//! Converts free-form, possibly malformed model output into exactly one
//! validated [`JobPosting`] record.
//!
//! # Architecture
//!
//! ```text
//! RawText → Fence Stripper → Object Slicer → Lenient Parser → Reconciler → JobPosting
//! ```
//!
//! The pipeline is purely synchronous and performs no I/O: the generative
//! model call happens in `rolescope-llm`, and persistence is the caller's
//! concern (output is appended to a dataset file as JSON-Lines). Each stage
//! consumes the previous stage's full output:
//!
//! - **Fence Stripper**: removes markdown code-block markers models wrap
//!   answers in
//! - **Object Slicer**: bounds the first JSON object among surrounding prose
//!   and duplicated payloads
//! - **Lenient Parser**: strict parse, then one bounded repair-and-retry for
//!   missing separators and trailing commas
//! - **Reconciler**: maps known alternate key spellings onto the canonical
//!   schema, applies defaults, and type-checks every field
//!
//! A run either yields one record or one [`ExtractError`]; there is no
//! partial output. Re-running on byte-identical input yields an identical
//! record except for `fetch_date`, which is stamped at validation time.
//!
//! # Example
//!
//! ```
//! use rolescope_extractor::parse_llm_response;
//!
//! let response = r#"```json
//! {"company": "Acme", "jobTitle": "SWE", "source_url": "https://x.test/1"}
//! ```"#;
//!
//! let posting = parse_llm_response(response).unwrap();
//! assert_eq!(posting.company, "Acme");
//! assert!(posting.skills.is_empty());
//! ```

#![warn(missing_docs)]

mod error;
mod fence;
mod reconcile;
mod repair;
mod slice;


pub use error::ExtractError;
pub use rolescope_domain::JobPosting;

/// Run the full pipeline on raw model output.
pub fn parse_llm_response(response: &str) -> Result<JobPosting, ExtractError> {
    let text = fence::strip_fences(response);
    let span = slice::slice_object(&text)?;
    let record = repair::lenient_parse(span)?;
    reconcile::reconcile(&record)
}
