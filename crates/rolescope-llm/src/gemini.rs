//! Gemini API client
//!
//! Async HTTP client for the Gemini `generateContent` endpoint with a
//! request timeout and retry with exponential backoff. Step one runs with
//! the Google Search grounding tool enabled so the model can actually fetch
//! the posting; step two runs ungrounded to convert the findings into JSON.

use crate::prompt;
use crate::LlmError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default timeout for model requests (60 seconds; grounded calls are slow)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Client for the Gemini generateContent API
pub struct GeminiClient {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

impl GeminiClient {
    /// Create a new client with default endpoint and model.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| LlmError::Communication(format!("failed to build client: {e}")))?;

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Override the API endpoint (useful for proxies and tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Run the two-step extraction for a job posting URL.
    ///
    /// Step one asks the model to find and describe the posting with web
    /// grounding enabled; step two converts that prose into the JSON shape.
    /// The returned string is the model's raw step-two answer - possibly
    /// fenced, duplicated, or malformed - ready for the extraction pipeline.
    pub async fn fetch_posting(&self, url: &str) -> Result<String, LlmError> {
        info!("fetching job posting data");
        let extracted = self
            .generate(&prompt::extraction_prompt(url), true)
            .await?;
        debug!(chars = extracted.len(), "grounded extraction complete");

        info!("converting to structured JSON");
        self.generate(&prompt::structuring_prompt(url, &extracted), false)
            .await
    }

    /// Generate text for a single prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the API is unreachable, keeps rate-limiting after
    /// all retries, or answers with an unexpected body.
    pub async fn generate(&self, prompt: &str, grounded: bool) -> Result<String, LlmError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );

        let request_body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            tools: grounded.then(|| {
                vec![Tool {
                    google_search: GoogleSearch {},
                }]
            }),
        };

        // Retry with exponential backoff: 1s, 2s, 4s, ...
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(&request_body).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return Self::first_candidate_text(
                            response
                                .json::<GenerateResponse>()
                                .await
                                .map_err(|e| {
                                    LlmError::InvalidResponse(format!(
                                        "failed to parse response: {e}"
                                    ))
                                })?,
                        );
                    } else if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        warn!("rate limited by API, backing off");
                        last_error = Some(LlmError::RateLimitExceeded);
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "unknown error".to_string());
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {status}: {error_text}"
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("request failed: {e}")));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("max retries exceeded".to_string())))
    }

    fn first_candidate_text(response: GenerateResponse) -> Result<String, LlmError> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("no candidates in response".to_string()))?;

        let text = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(LlmError::InvalidResponse(
                "candidate contained no text parts".to_string(),
            ));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grounded_request_carries_search_tool() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "prompt".to_string(),
                }],
            }],
            tools: Some(vec![Tool {
                google_search: GoogleSearch {},
            }]),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["tools"][0]["google_search"], serde_json::json!({}));
    }

    #[test]
    fn test_ungrounded_request_omits_tools() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "prompt".to_string(),
                }],
            }],
            tools: None,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_candidate_parts_are_joined() {
        let response = GenerateResponse {
            candidates: vec![Candidate {
                content: Content {
                    parts: vec![
                        Part {
                            text: "{\"a\":".to_string(),
                        },
                        Part {
                            text: " 1}".to_string(),
                        },
                    ],
                },
            }],
        };
        let text = GeminiClient::first_candidate_text(response).unwrap();
        assert_eq!(text, "{\"a\": 1}");
    }

    #[test]
    fn test_empty_candidates_rejected() {
        let response = GenerateResponse { candidates: vec![] };
        let result = GeminiClient::first_candidate_text(response);
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }
}
