//! Commit message providers.
//!
//! A provider turns staged diff text into a commit message. The interaction
//! loop and the session only see the [`MessageProvider`] trait, so providers
//! with different request/response schemas can be added without touching them.

pub mod openai;
pub mod prompt;
pub mod response;

use std::fmt;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::text::Language;

pub use openai::{DEFAULT_ENDPOINT, OpenAiCompatibleProvider, REQUEST_TIMEOUT_SECS, resolve_endpoint};
pub use prompt::{MAX_DIFF_CHARS, TRUNCATION_MARKER, truncate_diff};
pub use response::clean_message;

/// Host patterns whose URLs are used as-is, without appending the
/// chat-completion path.
pub const DEFAULT_RAW_ENDPOINT_PATTERNS: &[&str] = &["googleapis"];

/// Settings for a single provider, resolved from the config file.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub name: String,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub language: Language,
    /// Substrings that mark a base URL as a complete endpoint with its own
    /// routing convention.
    pub raw_endpoint_patterns: Vec<String>,
}

impl ProviderConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_key: String::new(),
            base_url: String::new(),
            model: String::new(),
            language: Language::default(),
            raw_endpoint_patterns: DEFAULT_RAW_ENDPOINT_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

// Hand-written so the API key never reaches logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("language", &self.language)
            .field("raw_endpoint_patterns", &self.raw_endpoint_patterns)
            .finish()
    }
}

/// Anything that can draft a commit message from a diff.
///
/// One call is one attempt; callers decide whether to try again.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageProvider: Send + Sync {
    async fn generate(&self, diff: &str) -> Result<String, ProviderError>;
}
