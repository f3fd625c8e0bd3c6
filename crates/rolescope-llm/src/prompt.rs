//! Prompt construction for the two-step extraction flow

/// Build the grounded extraction prompt for step one.
///
/// Asks the model to search the web for the posting and describe every field
/// we care about in free prose. The structured conversion happens in a
/// second, ungrounded call.
pub fn extraction_prompt(url: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(&format!(
        "Search the web and find the job posting at this URL: {url}\n\n"
    ));
    prompt.push_str(EXTRACTION_INSTRUCTIONS);
    prompt
}

/// Build the structuring prompt for step two.
///
/// The request URL is injected directly into the JSON skeleton as
/// `source_url`, so the downstream reconciler always finds a source even
/// when the model omits one of its own.
pub fn structuring_prompt(url: &str, extracted: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "Convert the following job posting information into a valid JSON object \
         with this exact structure:\n\n",
    );
    prompt.push_str(&format!(
        r#"{{
  "company": "string - company name",
  "jobTitle": "string - job title",
  "location": "string or null - location",
  "skills": ["array of strings - each skill/technology"],
  "responsibilities": ["array of strings - each responsibility as a single sentence"],
  "qualifications": ["array of strings - each qualification"],
  "yearlyPay": number or null - yearly salary as a number (e.g., 120000),
  "benefits": ["array of strings - each benefit"],
  "postingDate": "string or null - ISO date format YYYY-MM-DD",
  "source_url": "{url}"
}}"#
    ));
    prompt.push_str("\n\n");
    prompt.push_str(OUTPUT_FORMAT_REMINDER);
    prompt.push_str("\n\nJob posting information:\n");
    prompt.push_str(extracted);
    prompt
}

const EXTRACTION_INSTRUCTIONS: &str = "\
Extract and describe the following information from the job posting in detail:
- Company name
- Job title (the specific role title)
- Location (city and state, or \"Remote\", or \"Hybrid\")
- All required skills and experiences (programming languages, frameworks, libraries, tools, domain knowledge)
- All key responsibilities
- All qualifications (education, certifications, publications, etc.)
- Yearly salary/compensation if mentioned
- Benefits offered if mentioned
- Posting date if available

Provide a comprehensive extraction of all the information you find.";

const OUTPUT_FORMAT_REMINDER: &str = "\
CRITICAL: Return ONLY valid JSON. Do not include:
- Any explanatory text or comments
- Markdown code blocks
- Any text outside the JSON object
- Any invalid JSON syntax (ensure all strings are properly quoted, arrays are properly formatted, no trailing text)";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_prompt_carries_url() {
        let prompt = extraction_prompt("https://x.test/jobs/42");
        assert!(prompt.contains("https://x.test/jobs/42"));
        assert!(prompt.contains("Company name"));
    }

    #[test]
    fn test_structuring_prompt_injects_source_url() {
        let prompt = structuring_prompt("https://x.test/jobs/42", "Acme is hiring.");
        assert!(prompt.contains(r#""source_url": "https://x.test/jobs/42""#));
        assert!(prompt.contains("Acme is hiring."));
        assert!(prompt.contains("Return ONLY valid JSON"));
    }
}
