//! Chat-completion response envelope and message cleanup.

use serde::Deserialize;

use crate::error::ProviderError;

/// Fence openers the model may wrap its answer in, most specific first.
const FENCE_PREFIXES: [&str; 4] = ["```git commit", "```commit", "```text", "```"];
const FENCE_SUFFIX: &str = "```";

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMessage {
    #[serde(default)]
    #[allow(dead_code)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    #[serde(default)]
    pub message: Option<String>,
    // Providers disagree on the type (string, number, null).
    #[serde(default)]
    #[allow(dead_code)]
    pub code: Option<serde_json::Value>,
}

/// Decode a 200 response body and return the first choice's cleaned content.
pub(crate) fn parse_response(body: &[u8]) -> Result<String, ProviderError> {
    let response: ChatResponse = serde_json::from_slice(body)
        .map_err(|e| ProviderError::ResponseDecode(e.to_string()))?;

    let Some(choice) = response.choices.into_iter().next() else {
        return match response.error.and_then(|e| e.message) {
            Some(message) if !message.is_empty() => Err(ProviderError::Api(message)),
            _ => Err(ProviderError::EmptyResult),
        };
    };

    Ok(clean_message(&choice.message.content.unwrap_or_default()))
}

/// Trim the model output and drop a surrounding code fence.
///
/// Only the first matching opener is removed, then one trailing fence.
/// Clean input passes through unchanged.
pub fn clean_message(raw: &str) -> String {
    let mut content = raw.trim();
    if let Some(rest) = FENCE_PREFIXES.iter().find_map(|p| content.strip_prefix(p)) {
        content = rest;
    }
    if let Some(rest) = content.strip_suffix(FENCE_SUFFIX) {
        content = rest;
    }
    content.trim().to_string()
}
