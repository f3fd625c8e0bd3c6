//! Rolescope Domain Layer
//!
//! This crate contains the canonical record type all other layers produce or
//! consume. It holds pure data definitions only; the extraction pipeline,
//! LLM client, and CLI live in other crates and depend on this one.
//!
//! ## Key Concepts
//!
//! - **JobPosting**: the canonical record - the sole durable output of a run
//! - **Stable key order**: fields serialize in schema declaration order, so
//!   every emitted JSON-Lines row has identical key layout
//! - **Fetch stamp**: `fetch_date` is always system-generated, never parsed
//!   from upstream text

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod posting;

// Re-exports for convenience
pub use posting::JobPosting;
