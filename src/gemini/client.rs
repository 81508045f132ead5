//! Client for the Gemini `generateContent` API.
//!
//! Sends a single-turn request (one content block, one text part) and
//! extracts the generated text from the response envelope. The API key
//! travels as the `key` query parameter, matching the public endpoint.

use crate::config::GeminiConfig;
use crate::error::{EvalError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request body for `generateContent`.
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

/// Response envelope from `generateContent`.
///
/// Only the path to the generated text is modelled; everything else in
/// the envelope is ignored.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

/// Gemini `generateContent` client.
///
/// Holds one `reqwest::Client` for its lifetime so concurrent calls share
/// the underlying connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Get the generation endpoint URL.
    fn endpoint(&self) -> String {
        let base = self.config.api_base.trim_end_matches('/');
        format!("{}/models/{}:generateContent", base, self.config.model)
    }

    /// Generate text for a prompt and return the first candidate's text.
    ///
    /// Fails with `EvalError::Config` before any network I/O when the API
    /// key is blank.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        if self.config.api_key.trim().is_empty() {
            return Err(EvalError::Config(
                "Generation API key is not configured. Set GEMINI_API_KEY environment variable or add to config file.".to_string(),
            ));
        }

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(EvalError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Self::extract_text(&body)
    }

    /// Decode the envelope and pull out the generated text.
    fn extract_text(body: &str) -> Result<String> {
        let envelope: GenerateContentResponse = serde_json::from_str(body)
            .map_err(|e| EvalError::Envelope(format!("invalid envelope JSON: {}", e)))?;

        let candidate = envelope
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| EvalError::Envelope("no candidates in response".to_string()))?;

        let part = candidate
            .content
            .parts
            .into_iter()
            .next()
            .ok_or_else(|| EvalError::Envelope("candidate has no content parts".to_string()))?;

        Ok(part.text)
    }

    /// Test connectivity to the API.
    pub async fn test_connection(&self) -> Result<()> {
        let response = self
            .generate("Reply with the single word ready and nothing else.")
            .await?;

        if response.to_lowercase().contains("ready") {
            Ok(())
        } else {
            Err(EvalError::Envelope(format!(
                "Unexpected response: {}",
                response
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(api_base: &str) -> GeminiConfig {
        GeminiConfig {
            api_base: api_base.to_string(),
            api_key: "test".to_string(),
            model: "gemini-test".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_endpoint_construction() {
        let client = GeminiClient::new(test_config("https://api.example.com/"));
        assert_eq!(
            client.endpoint(),
            "https://api.example.com/models/gemini-test:generateContent"
        );

        // Without trailing slash
        let client2 = GeminiClient::new(test_config("https://api.example.com"));
        assert_eq!(
            client2.endpoint(),
            "https://api.example.com/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_extract_text() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "hello"}], "role": "model"}}
            ]
        }"#;
        assert_eq!(GeminiClient::extract_text(body).unwrap(), "hello");
    }

    #[test]
    fn test_extract_text_no_candidates() {
        let body = r#"{"candidates": []}"#;
        let err = GeminiClient::extract_text(body).unwrap_err();
        assert!(matches!(err, EvalError::Envelope(_)));
    }

    #[test]
    fn test_extract_text_missing_parts() {
        let body = r#"{"candidates": [{"content": {"role": "model"}}]}"#;
        let err = GeminiClient::extract_text(body).unwrap_err();
        assert!(matches!(err, EvalError::Envelope(_)));
    }

    #[test]
    fn test_extract_text_invalid_json() {
        let err = GeminiClient::extract_text("not json").unwrap_err();
        assert!(matches!(err, EvalError::Envelope(_)));
    }

    #[test]
    fn test_generate_fails_fast_on_blank_key() {
        // Unroutable base: the call must fail on the credential check
        // before any request is attempted.
        let config = GeminiConfig {
            api_key: "  ".to_string(),
            ..test_config("http://127.0.0.1:1")
        };
        let client = GeminiClient::new(config);

        let err = tokio_test::block_on(client.generate("prompt")).unwrap_err();
        assert!(matches!(err, EvalError::Config(_)));
    }
}
