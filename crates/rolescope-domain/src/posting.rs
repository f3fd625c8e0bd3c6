//! Job posting module - the canonical record Rolescope emits

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A validated job posting record.
///
/// Postings are immutable once created; a fresh extraction produces a fresh
/// record. Serialization uses camelCase keys in declaration order, so the
/// JSON-Lines output has a stable, schema-defined key layout. Nullable
/// fields serialize as explicit `null` rather than being omitted - every row
/// carries all eleven keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    /// Company posting the job
    pub company: String,

    /// Role title (e.g., "Senior Backend Engineer")
    pub job_title: String,

    /// Location ("San Francisco, CA", "Remote", ...), null if unspecified
    pub location: Option<String>,

    /// Required languages, libraries, tools, and domain knowledge
    pub skills: Vec<String>,

    /// Single-sentence summaries of key responsibilities
    pub responsibilities: Vec<String>,

    /// Education, certifications, and other formal requirements
    pub qualifications: Vec<String>,

    /// Yearly compensation in dollars, null if unspecified
    pub yearly_pay: Option<f64>,

    /// Benefits offered (stock, health insurance, 401k, PTO, ...)
    pub benefits: Vec<String>,

    /// ISO date (YYYY-MM-DD) the job was posted, null if unavailable
    pub posting_date: Option<String>,

    /// RFC 3339 timestamp of when this record was produced.
    /// Always stamped by the validator, never taken from upstream text.
    pub fetch_date: String,

    /// URL of the job posting
    pub source_url: String,
}

impl JobPosting {
    /// Current wall-clock time in the format `fetch_date` carries.
    pub fn fetch_stamp() -> String {
        Utc::now().to_rfc3339()
    }

    /// Render the record as one JSON line for append-only accumulation.
    ///
    /// The returned string contains no newline; callers add the line
    /// terminator when appending to a dataset file.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
