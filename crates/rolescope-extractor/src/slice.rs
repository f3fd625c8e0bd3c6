//! Locate the span of one JSON object inside arbitrary text

use crate::error::ExtractError;

/// Bound the first JSON object in `text`, returning its candidate span.
///
/// The model sometimes surrounds the object with prose, and sometimes emits
/// the same object twice in a row. A string-aware brace-depth scan picks the
/// first balanced top-level object, which both suppresses duplicates and
/// survives braces or `\n{` sequences inside string values.
///
/// If the object never closes (truncated output), the span runs from the
/// first `{` through the last `}` in the text, or to the end when no `}`
/// exists, leaving the repair pass to make what it can of it. No `{` at all
/// means there is nothing to extract.
pub(crate) fn slice_object(text: &str) -> Result<&str, ExtractError> {
    let start = text.find('{').ok_or(ExtractError::MalformedInput)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in text.as_bytes().iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..=i]);
                }
            }
            _ => {}
        }
    }

    // Truncated object: the span never balanced.
    let end = match text.rfind('}') {
        Some(i) if i > start => i + 1,
        _ => text.len(),
    };
    Ok(text[start..end].trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_brace_is_malformed_input() {
        let result = slice_object("no json here at all");
        assert!(matches!(result, Err(ExtractError::MalformedInput)));
    }

    #[test]
    fn test_plain_object() {
        let span = slice_object(r#"{"a": 1}"#).unwrap();
        assert_eq!(span, r#"{"a": 1}"#);
    }

    #[test]
    fn test_object_inside_prose() {
        let span = slice_object(r#"Sure! {"a": 1} Hope that helps."#).unwrap();
        assert_eq!(span, r#"{"a": 1}"#);
    }

    #[test]
    fn test_duplicate_object_takes_first() {
        let text = "{\"a\": 1}\n{\"a\": 1}";
        assert_eq!(slice_object(text).unwrap(), r#"{"a": 1}"#);
    }

    #[test]
    fn test_nested_objects_stay_whole() {
        let text = r#"{"outer": {"inner": 1}, "b": 2}"#;
        assert_eq!(slice_object(text).unwrap(), text);
    }

    #[test]
    fn test_brace_inside_string_value() {
        let text = "{\"note\": \"see\\n{literal} braces\", \"b\": 2}";
        assert_eq!(slice_object(text).unwrap(), text);
    }

    #[test]
    fn test_newline_brace_inside_string_does_not_truncate() {
        // The original heuristic would mis-slice on the "\n{" inside the
        // string; the depth scan keeps the whole object.
        let text = "{\"desc\": \"first line\n{second}\", \"b\": 2}";
        assert_eq!(slice_object(text).unwrap(), text);
    }

    #[test]
    fn test_truncated_object_reaches_last_brace() {
        let text = r#"{"a": {"b": 1}"#;
        assert_eq!(slice_object(text).unwrap(), r#"{"a": {"b": 1}"#);
    }

    #[test]
    fn test_truncated_object_without_any_close() {
        let text = r#"{"a": 1"#;
        assert_eq!(slice_object(text).unwrap(), r#"{"a": 1"#);
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let text = r#"{"quote": "she said \"hi\"", "b": 2}"#;
        assert_eq!(slice_object(text).unwrap(), text);
    }
}
