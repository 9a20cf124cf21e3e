//! Parser for the line-based `~/.git_commit` format.
//!
//! ```text
//! # comment
//! current_provider = deepseek
//! language = en
//! api_key = sk-...
//! deepseek.base_url = https://api.deepseek.com
//! ```

use std::collections::BTreeMap;

use tracing::debug;

/// Name of the provider that unqualified keys belong to.
pub const DEFAULT_PROVIDER: &str = "default";

/// Raw settings for one provider as written in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderEntry {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub language: Option<String>,
    pub raw_endpoint_patterns: Option<Vec<String>>,
}

/// Parsed config file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub current_provider: Option<String>,
    pub language: Option<String>,
    /// Keyed by provider name; always contains [`DEFAULT_PROVIDER`].
    pub providers: BTreeMap<String, ProviderEntry>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let mut providers = BTreeMap::new();
        providers.insert(DEFAULT_PROVIDER.to_string(), ProviderEntry::default());
        Self {
            current_provider: None,
            language: None,
            providers,
        }
    }
}

/// Parse config text. Unknown keys are ignored.
pub fn parse_config(content: &str) -> ConfigFile {
    let mut config = ConfigFile::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((full_key, value)) = line.split_once('=') else {
            // Legacy format: a bare API key on its own line.
            let default = config.default_entry_mut();
            if default.api_key.is_empty() {
                default.api_key = line.to_string();
            }
            continue;
        };

        let full_key = full_key.trim().to_lowercase();
        let value = value.trim();

        match full_key.as_str() {
            "current_provider" | "provider" => {
                // Provider names are stored lowercased, like keys.
                config.current_provider = non_empty(&value.to_lowercase());
                continue;
            }
            "language" => {
                config.language = non_empty(value);
                continue;
            }
            _ => {}
        }

        let (provider, key) = match full_key.split_once('.') {
            Some((provider, key)) => (provider.to_string(), key.to_string()),
            None => (DEFAULT_PROVIDER.to_string(), full_key.clone()),
        };

        let entry = config.providers.entry(provider).or_default();
        match key.as_str() {
            "api_key" => entry.api_key = value.to_string(),
            "base_url" => entry.base_url = value.to_string(),
            "model" => entry.model = value.to_string(),
            "language" => entry.language = non_empty(value),
            "raw_endpoint_patterns" => {
                entry.raw_endpoint_patterns = Some(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|p| !p.is_empty())
                        .map(String::from)
                        .collect(),
                );
            }
            _ => debug!("Ignoring unknown config key '{}'", full_key),
        }
    }

    config
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl ConfigFile {
    fn default_entry_mut(&mut self) -> &mut ProviderEntry {
        self.providers
            .entry(DEFAULT_PROVIDER.to_string())
            .or_default()
    }
}
