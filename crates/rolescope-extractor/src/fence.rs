//! Strip markdown code fences from model output

use std::borrow::Cow;

/// Remove triple-backtick fence markers, keeping the text between them.
///
/// Models often wrap their JSON answer in a markdown code block, optionally
/// tagged `json`. Text without a fence passes through unchanged, including
/// text that merely contains stray backtick characters. This stage cannot
/// fail; the worst case is a no-op.
pub(crate) fn strip_fences(raw: &str) -> Cow<'_, str> {
    if !raw.contains("```") {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(idx) = rest.find("```") {
        out.push_str(&rest[..idx]);
        rest = &rest[idx + 3..];
        if let Some(tagged) = rest.strip_prefix("json") {
            rest = tagged;
        }
        if let Some(after_newline) = rest.strip_prefix('\n') {
            rest = after_newline;
        }
    }
    out.push_str(rest);
    Cow::Owned(out.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_without_fence() {
        let raw = r#"{"company": "Acme"}"#;
        assert_eq!(strip_fences(raw), raw);
    }

    #[test]
    fn test_strips_json_tagged_fence() {
        let raw = "```json\n{\"company\": \"Acme\"}\n```";
        assert_eq!(strip_fences(raw), "{\"company\": \"Acme\"}");
    }

    #[test]
    fn test_strips_untagged_fence() {
        let raw = "```\n{\"company\": \"Acme\"}\n```";
        assert_eq!(strip_fences(raw), "{\"company\": \"Acme\"}");
    }

    #[test]
    fn test_keeps_surrounding_prose() {
        let raw = "Here is the JSON:\n```json\n{\"a\": 1}\n```\nDone.";
        let out = strip_fences(raw);
        assert!(out.contains("Here is the JSON:"));
        assert!(out.contains("{\"a\": 1}"));
        assert!(!out.contains("```"));
    }

    #[test]
    fn test_single_backticks_untouched() {
        let raw = r#"{"company": "Acme `Inc`"}"#;
        assert_eq!(strip_fences(raw), raw);
    }
}
