//! Map raw records onto the canonical schema and type-check them

use crate::error::ExtractError;
use rolescope_domain::JobPosting;
use serde_json::{Map, Value};

/// Ordered alternate spellings per canonical field. The upstream model is
/// observed to drift between camelCase, snake_case, and more verbose names;
/// the first key that is present with a non-null value wins.
const COMPANY_KEYS: &[&str] = &["company", "company_name"];
const JOB_TITLE_KEYS: &[&str] = &["jobTitle", "job_title"];
const LOCATION_KEYS: &[&str] = &["location"];
const SKILLS_KEYS: &[&str] = &[
    "skills",
    "skills_and_experiences",
    "skills_and_experiences_required",
];
const RESPONSIBILITIES_KEYS: &[&str] = &["responsibilities", "key_responsibilities"];
const QUALIFICATIONS_KEYS: &[&str] = &["qualifications", "required_qualifications"];
const YEARLY_PAY_KEYS: &[&str] = &["yearlyPay", "yearly_pay", "salary"];
const BENEFITS_KEYS: &[&str] = &["benefits"];
const POSTING_DATE_KEYS: &[&str] = &["postingDate", "posting_date"];
const SOURCE_URL_KEYS: &[&str] = &["postSource", "source_url"];

/// Resolve a raw record into a validated posting.
///
/// Each canonical field is looked up through its alternate-key list, then
/// type-checked against the declared shape. Absent array fields default to
/// empty; absent nullable scalars stay null; an absent required scalar fails
/// with the canonical field name. `fetch_date` is never taken from input -
/// it is stamped here with the current wall-clock time, the one documented
/// exception to the pipeline's idempotence.
pub(crate) fn reconcile(record: &Map<String, Value>) -> Result<JobPosting, ExtractError> {
    Ok(JobPosting {
        company: required_string(record, COMPANY_KEYS, "company")?,
        job_title: required_string(record, JOB_TITLE_KEYS, "jobTitle")?,
        location: nullable_string(record, LOCATION_KEYS, "location")?,
        skills: string_array(record, SKILLS_KEYS, "skills")?,
        responsibilities: string_array(record, RESPONSIBILITIES_KEYS, "responsibilities")?,
        qualifications: string_array(record, QUALIFICATIONS_KEYS, "qualifications")?,
        yearly_pay: nullable_number(record, YEARLY_PAY_KEYS, "yearlyPay")?,
        benefits: string_array(record, BENEFITS_KEYS, "benefits")?,
        posting_date: nullable_string(record, POSTING_DATE_KEYS, "postingDate")?,
        fetch_date: JobPosting::fetch_stamp(),
        source_url: required_string(record, SOURCE_URL_KEYS, "sourceUrl")?,
    })
}

/// First alternate key present with a non-null value, in priority order.
fn resolve<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| !value.is_null())
}

fn required_string(
    record: &Map<String, Value>,
    keys: &[&str],
    field: &'static str,
) -> Result<String, ExtractError> {
    match resolve(record, keys) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(violation(field, "string", other)),
        None => Err(ExtractError::MissingRequiredField(field)),
    }
}

fn nullable_string(
    record: &Map<String, Value>,
    keys: &[&str],
    field: &'static str,
) -> Result<Option<String>, ExtractError> {
    match resolve(record, keys) {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(violation(field, "string or null", other)),
        None => Ok(None),
    }
}

fn nullable_number(
    record: &Map<String, Value>,
    keys: &[&str],
    field: &'static str,
) -> Result<Option<f64>, ExtractError> {
    match resolve(record, keys) {
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(violation(field, "number or null", other)),
        None => Ok(None),
    }
}

fn string_array(
    record: &Map<String, Value>,
    keys: &[&str],
    field: &'static str,
) -> Result<Vec<String>, ExtractError> {
    let Some(value) = resolve(record, keys) else {
        return Ok(Vec::new());
    };
    let items = value
        .as_array()
        .ok_or_else(|| violation(field, "array of strings", value))?;
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(violation(field, "array of strings", other)),
        })
        .collect()
}

fn violation(field: &'static str, expected: &'static str, actual: &Value) -> ExtractError {
    ExtractError::SchemaViolation {
        field,
        expected,
        actual: shape_of(actual),
    }
}

fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
