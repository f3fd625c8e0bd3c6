//! Strict parse with one bounded repair-and-retry pass

use crate::error::ExtractError;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Parse attempt states. `Repaired` is terminal: there is no third attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Strict,
    Repaired,
}

/// Parse a candidate span into a raw key/value record.
///
/// Tries a strict parse first. On failure, applies one repair pass for the
/// two malformations the model is known to produce (missing separators after
/// string values, trailing commas) and retries exactly once. If that also
/// fails, both parse diagnostics are reported together.
///
/// Repairs are best-effort syntactic recovery only; no semantic validation
/// happens here.
pub(crate) fn lenient_parse(span: &str) -> Result<Map<String, Value>, ExtractError> {
    let mut original = String::new();
    for attempt in [Attempt::Strict, Attempt::Repaired] {
        let candidate = match attempt {
            Attempt::Strict => span.to_string(),
            Attempt::Repaired => repair(span),
        };
        match parse_object(&candidate) {
            Ok(record) => {
                if attempt == Attempt::Repaired {
                    debug!("parse succeeded after repair pass");
                }
                return Ok(record);
            }
            Err(e) => match attempt {
                Attempt::Strict => {
                    warn!("strict parse failed, applying repair pass: {e}");
                    original = e;
                }
                Attempt::Repaired => {
                    return Err(ExtractError::InvalidJson {
                        original,
                        repaired: e,
                    });
                }
            },
        }
    }
    unreachable!("both parse attempts returned without a verdict")
}

fn parse_object(candidate: &str) -> Result<Map<String, Value>, String> {
    let value: Value = serde_json::from_str(candidate).map_err(|e| e.to_string())?;
    match value {
        Value::Object(record) => Ok(record),
        other => Err(format!("expected a JSON object, got {}", shape_of(&other))),
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

/// Apply the two known repairs in a single string-aware pass:
///
/// 1. A closed string literal followed by something other than a delimiter
///    (`,` `:` `]` `}`) gets a comma inserted after it.
/// 2. A comma whose next non-whitespace character is `]` or `}` is dropped.
fn repair(span: &str) -> String {
    let chars: Vec<char> = span.chars().collect();
    let mut out = String::with_capacity(span.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '"' {
            // Copy the whole string literal, honoring escapes.
            out.push(c);
            i += 1;
            let mut escaped = false;
            while i < chars.len() {
                let s = chars[i];
                out.push(s);
                i += 1;
                if escaped {
                    escaped = false;
                } else if s == '\\' {
                    escaped = true;
                } else if s == '"' {
                    break;
                }
            }
            if let Some(&next) = chars[i..].iter().find(|ch| !ch.is_whitespace()) {
                if !matches!(next, ',' | ':' | '}' | ']') {
                    out.push(',');
                }
            }
            continue;
        }
        if c == ',' {
            if let Some(&next) = chars[i + 1..].iter().find(|ch| !ch.is_whitespace()) {
                if matches!(next, '}' | ']') {
                    i += 1;
                    continue;
                }
            }
        }
        out.push(c);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_parse_untouched() {
        let record = lenient_parse(r#"{"company": "Acme", "n": 3}"#).unwrap();
        assert_eq!(record["company"], "Acme");
        assert_eq!(record["n"], 3);
    }

    #[test]
    fn test_trailing_comma_before_brace_is_repaired() {
        let record = lenient_parse(r#"{"company": "Acme",}"#).unwrap();
        assert_eq!(record["company"], "Acme");
    }

    #[test]
    fn test_trailing_comma_before_bracket_is_repaired() {
        let record = lenient_parse(r#"{"skills": ["Go", "Rust",]}"#).unwrap();
        assert_eq!(record["skills"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_comma_between_string_values_is_repaired() {
        let record = lenient_parse(r#"{"skills": ["Go" "Rust"]}"#).unwrap();
        assert_eq!(record["skills"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_unrepairable_input_carries_both_diagnostics() {
        let result = lenient_parse(r#"{"company": }"#);
        match result {
            Err(ExtractError::InvalidJson { original, repaired }) => {
                assert!(!original.is_empty());
                assert!(!repaired.is_empty());
            }
            other => panic!("expected InvalidJson, got {other:?}"),
        }
    }

    #[test]
    fn test_top_level_array_is_rejected() {
        let result = lenient_parse(r#"["not", "an", "object"]"#);
        assert!(matches!(result, Err(ExtractError::InvalidJson { .. })));
    }

    #[test]
    fn test_repair_keeps_colon_after_key() {
        // Keys are strings too; the delimiter check must not break them.
        assert_eq!(repair(r#"{"a": 1}"#), r#"{"a": 1}"#);
    }

    #[test]
    fn test_repair_ignores_commas_inside_strings() {
        let span = r#"{"note": "a, b, c",}"#;
        assert_eq!(repair(span), r#"{"note": "a, b, c"}"#);
    }
}
