//! Provider for OpenAI-compatible chat-completion endpoints.
//!
//! Works with OpenAI, DeepSeek, Moonshot and any other service that speaks the
//! same `POST /chat/completions` schema.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::debug;

use crate::error::ProviderError;

use super::prompt::{system_prompt, user_message};
use super::response::parse_response;
use super::{MessageProvider, ProviderConfig};

/// Endpoint used when the config leaves `base_url` empty.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Upper bound on one HTTP round trip.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

const COMPLETIONS_PATH: &str = "/chat/completions";
const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<RequestMessage<'a>>,
    temperature: f64,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Turn a configured base URL into the full chat-completion endpoint.
///
/// A bare host or API root gets `/chat/completions` appended. URLs that
/// already end with it, or that contain one of `raw_patterns`, are kept.
pub fn resolve_endpoint(base_url: &str, raw_patterns: &[String]) -> String {
    let base_url = base_url.trim();
    if base_url.is_empty() {
        return DEFAULT_ENDPOINT.to_string();
    }

    if base_url.ends_with(COMPLETIONS_PATH)
        || raw_patterns
            .iter()
            .any(|p| !p.is_empty() && base_url.contains(p.as_str()))
    {
        return base_url.to_string();
    }

    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with(COMPLETIONS_PATH) {
        return trimmed.to_string();
    }
    format!("{}{}", trimmed, COMPLETIONS_PATH)
}

/// Sends the diff to an OpenAI-compatible endpoint, one attempt per call.
pub struct OpenAiCompatibleProvider {
    config: ProviderConfig,
    endpoint: String,
    client: Client,
    timeout_secs: u64,
}

impl OpenAiCompatibleProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        Self::with_timeout(config, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Build a provider with a custom round-trip timeout.
    pub fn with_timeout(config: ProviderConfig, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProviderError::Transport)?;
        let endpoint = resolve_endpoint(&config.base_url, &config.raw_endpoint_patterns);
        debug!("Provider '{}' resolved endpoint {}", config.name, endpoint);

        Ok(Self {
            config,
            endpoint,
            client,
            timeout_secs: timeout.as_secs(),
        })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn encode_request(&self, diff: &str) -> Result<Vec<u8>, ProviderError> {
        let user = user_message(diff);
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                RequestMessage {
                    role: "system",
                    content: system_prompt(self.config.language),
                },
                RequestMessage {
                    role: "user",
                    content: &user,
                },
            ],
            temperature: TEMPERATURE,
            stream: false,
        };

        serde_json::to_vec(&request).map_err(|e| ProviderError::RequestEncoding(e.to_string()))
    }

    fn map_send_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.timeout_secs)
        } else if err.is_builder() {
            ProviderError::RequestEncoding(err.to_string())
        } else {
            ProviderError::Transport(err)
        }
    }
}

#[async_trait]
impl MessageProvider for OpenAiCompatibleProvider {
    async fn generate(&self, diff: &str) -> Result<String, ProviderError> {
        let body = self.encode_request(diff)?;
        debug!(
            "POST {} (model={}, {} bytes)",
            self.endpoint,
            self.config.model,
            body.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.config.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(e))?;
        debug!("Received {} byte response", bytes.len());

        parse_response(&bytes)
    }
}
