use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::errors::{ConfigError, ProviderError};
use crate::providers::GenerativeModel;

/// Default Gemini model for name translation
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Finish reason of a complete reply
pub const FINISH_STOP: &str = "STOP";

/// Public Gemini REST endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini client for the `generateContent` API
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Model name, e.g. `gemini-2.5-flash`
    model: String,
    /// Models collection URL
    endpoint: String,
    /// Sampling temperature sent with every request
    temperature: Option<f32>,
}

// The API key stays out of debug output
impl fmt::Debug for Gemini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gemini")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Gemini generate request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Conversation contents
    contents: Vec<GeminiContent>,

    /// Sampling parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// One content block of a request or a candidate
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// A text part
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: String,
}

/// Sampling parameters
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Gemini generate response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    pub content: Option<GeminiContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: Option<u32>,
    #[serde(default)]
    pub candidates_token_count: Option<u32>,
}

impl GeminiRequest {
    /// Create a request with a single user prompt
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt.into() }],
            }],
            generation_config: None,
        }
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.generation_config.get_or_insert_with(GenerationConfig::default).temperature = Some(temperature);
        self
    }
}

impl Gemini {
    /// Create a new Gemini client.
    ///
    /// Fails before any network call when `api_key` is empty.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential("GEMINI_API_KEY".to_string()));
        }

        let model = model.into();
        let endpoint = endpoint.into();

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ConfigError::InvalidValue(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            model: if model.is_empty() { DEFAULT_MODEL.to_string() } else { model },
            endpoint: if endpoint.is_empty() {
                DEFAULT_ENDPOINT.to_string()
            } else {
                endpoint.trim_end_matches('/').to_string()
            },
            temperature: None,
        })
    }

    /// Set the sampling temperature used for every request
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Complete a generate request
    pub async fn complete(&self, request: GeminiRequest) -> Result<GeminiResponse, ProviderError> {
        let url = format!("{}/{}:generateContent", self.endpoint, self.model);
        debug!("Calling Gemini model {}", self.model);

        let response = self.client.post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // The request URL carries the key
                let message = e.to_string().replace(&self.api_key, "***");
                if e.is_timeout() || e.is_connect() {
                    ProviderError::ConnectionError(format!("Gemini request failed: {}", message))
                } else {
                    ProviderError::RequestFailed(format!("Gemini request failed: {}", message))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini API error ({}): {}", status, message);
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::AuthenticationError(message),
                code => ProviderError::ApiError { status_code: code, message },
            });
        }

        response.json::<GeminiResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Gemini response: {}", e)))
    }

    /// Extract text from the first candidate
    pub fn extract_text_from_response(response: &GeminiResponse) -> String {
        response.candidates.first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default()
    }

    /// Finish reason of the first candidate when it is not a normal stop
    pub fn early_stop_reason(response: &GeminiResponse) -> Option<&str> {
        response.candidates.first()
            .and_then(|c| c.finish_reason.as_deref())
            .filter(|reason| *reason != FINISH_STOP)
    }
}

#[async_trait]
impl GenerativeModel for Gemini {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let mut request = GeminiRequest::new(prompt);
        if let Some(temperature) = self.temperature {
            request = request.temperature(temperature);
        }

        let response = self.complete(request).await?;
        if let Some(usage) = &response.usage_metadata {
            debug!(
                "Gemini usage: {} prompt tokens, {} completion tokens",
                usage.prompt_token_count.unwrap_or(0),
                usage.candidates_token_count.unwrap_or(0)
            );
        }

        // A reply cut short leaves the trailing batch entries blank
        if let Some(reason) = Self::early_stop_reason(&response) {
            warn!("Gemini stopped early: {}", reason);
        }

        Ok(Self::extract_text_from_response(&response))
    }
}
