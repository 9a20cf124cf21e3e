//! Configuration loading and provider resolution.

pub mod parser;

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;
use crate::provider::{DEFAULT_ENDPOINT, ProviderConfig};
use crate::text::Language;

pub use parser::{ConfigFile, DEFAULT_PROVIDER, ProviderEntry, parse_config};

/// Config file name inside the home directory.
pub const CONFIG_FILE_NAME: &str = ".git_commit";

/// Environment variable pointing at an alternate config file.
pub const CONFIG_ENV_VAR: &str = "GMH_CONFIG";

/// Environment variable that overrides the default provider's base URL.
pub const BASE_URL_ENV_VAR: &str = "OPENAI_API_BASE";

/// Model used for the `default` provider when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const SAMPLE_CONFIG: &str = include_str!("sample_config.ini");

/// Loaded application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    file: ConfigFile,
}

impl AppConfig {
    /// Load from `path`, `$GMH_CONFIG`, or `~/.git_commit`, in that order.
    ///
    /// A missing file is replaced by a commented sample and reported as
    /// [`ConfigError::SampleCreated`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = config_path(path)?;
        debug!("Loading config from {}", path.display());

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(write_sample(&path));
            }
            Err(source) => return Err(ConfigError::ReadFailed { path, source }),
        };

        let mut config = Self::parse(&content);
        config.apply_env_overrides();
        Ok(config)
    }

    /// Build a config from file contents without touching the environment.
    pub fn parse(content: &str) -> Self {
        Self {
            file: parse_config(content),
        }
    }

    /// Apply `OPENAI_API_BASE` to the default provider.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = env::var(BASE_URL_ENV_VAR)
            && !base_url.is_empty()
        {
            debug!("{} overrides default base_url", BASE_URL_ENV_VAR);
            self.file
                .providers
                .entry(DEFAULT_PROVIDER.to_string())
                .or_default()
                .base_url = base_url;
        }
    }

    /// Select a provider by name, overriding `current_provider` from the file.
    pub fn set_current_provider(&mut self, name: impl Into<String>) {
        self.file.current_provider = Some(name.into().to_lowercase());
    }

    pub fn current_provider(&self) -> Option<&str> {
        self.file.current_provider.as_deref()
    }

    /// App-wide language for UI text and prompts.
    pub fn language(&self) -> Language {
        Language::from_code(self.file.language.as_deref().unwrap_or_default())
    }

    pub fn file(&self) -> &ConfigFile {
        &self.file
    }

    /// Pick the provider to use.
    ///
    /// 1. `current_provider`, which must exist and have an api_key.
    /// 2. `default`, if it has an api_key; empty base_url and model are filled in.
    /// 3. The first other provider, by name, that has an api_key.
    pub fn resolve_provider(&self) -> Result<ProviderConfig, ConfigError> {
        let providers = &self.file.providers;

        if let Some(name) = &self.file.current_provider {
            let entry = providers
                .get(name)
                .ok_or_else(|| ConfigError::UnknownProvider(name.clone()))?;
            if entry.api_key.is_empty() {
                return Err(ConfigError::MissingApiKey(name.clone()));
            }
            return Ok(self.build(name, entry));
        }

        if let Some(entry) = providers.get(DEFAULT_PROVIDER)
            && !entry.api_key.is_empty()
        {
            let mut config = self.build(DEFAULT_PROVIDER, entry);
            if config.base_url.is_empty() {
                config.base_url = DEFAULT_ENDPOINT.to_string();
            }
            if config.model.is_empty() {
                config.model = DEFAULT_MODEL.to_string();
            }
            return Ok(config);
        }

        providers
            .iter()
            .find(|(_, entry)| !entry.api_key.is_empty())
            .map(|(name, entry)| self.build(name, entry))
            .ok_or(ConfigError::NoUsableProvider)
    }

    fn build(&self, name: &str, entry: &ProviderEntry) -> ProviderConfig {
        let mut config = ProviderConfig::new(name);
        config.api_key = entry.api_key.clone();
        config.base_url = entry.base_url.clone();
        config.model = entry.model.clone();
        config.language = match &entry.language {
            Some(code) => Language::from_code(code),
            None => self.language(),
        };
        if let Some(patterns) = &entry.raw_endpoint_patterns {
            config.raw_endpoint_patterns = patterns.clone();
        }
        config
    }
}

/// Resolve which config file to read.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Ok(path) = env::var(CONFIG_ENV_VAR)
        && !path.is_empty()
    {
        return Ok(PathBuf::from(path));
    }
    dirs::home_dir()
        .map(|home| home.join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoHomeDir)
}

/// Write the sample config and return the error that tells the user about it.
fn write_sample(path: &Path) -> ConfigError {
    match std::fs::write(path, SAMPLE_CONFIG) {
        Ok(()) => {
            debug!("Created sample config at {}", path.display());
            ConfigError::SampleCreated(path.to_path_buf())
        }
        Err(source) => ConfigError::SampleWriteFailed {
            path: path.to_path_buf(),
            source,
        },
    }
}
