//! Google Gemini implementation of [`ExplanationService`].
//!
//! Blocking client on top of `ureq`. Enabled with the `gemini` feature.
//!
//! ```rust,ignore
//! use fcmeans_core::gemini::{GeminiConfig, GeminiService};
//!
//! let service = GeminiService::new(GeminiConfig {
//!     api_key: std::env::var("GEMINI_API_KEY")?,
//!     ..Default::default()
//! });
//! let text = explain_region(&service, &profile, 17, 3)?;
//! ```

use crate::explain::{ExplanationService, ServiceError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// Gemini client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key sent as `x-goog-api-key`
    pub api_key: String,
    /// Model name (e.g., "gemini-2.0-flash")
    pub model: String,
    /// Base URL of the generative language API
    pub endpoint: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.0-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

impl GeminiConfig {
    /// Full `generateContent` URL for the configured model.
    pub fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Debug, Deserialize)]
struct TextPart {
    #[serde(default)]
    text: Option<String>,
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateResponse) -> Result<String, ServiceError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(ServiceError::EmptyResponse);
    }
    Ok(text)
}

/// Gemini-backed explanation service.
pub struct GeminiService {
    agent: ureq::Agent,
    config: GeminiConfig,
}

impl GeminiService {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            config,
        }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

impl ExplanationService for GeminiService {
    fn generate_explanation(&self, prompt: &str) -> Result<String, ServiceError> {
        if self.config.api_key.is_empty() {
            return Err(ServiceError::NotConfigured("missing API key".to_string()));
        }

        let url = self.config.url();
        debug!(model = %self.config.model, "Calling Gemini generateContent");

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}],
            }],
        });

        let mut response = self
            .agent
            .post(url.as_str())
            .header("x-goog-api-key", self.config.api_key.as_str())
            .send_json(&body)
            .map_err(|e| ServiceError::Request(e.to_string()))?;

        let parsed: GenerateResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| ServiceError::Malformed(e.to_string()))?;

        extract_text(parsed)
    }
}
