//! Error types for gmh modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading the config file and resolving the active provider.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the home directory; pass --config or set GMH_CONFIG")]
    NoHomeDir,

    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create sample config file {path}: {source}")]
    SampleWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file did not exist; a sample was written to {0}. Fill it in and retry.")]
    SampleCreated(PathBuf),

    #[error("Provider '{0}' is missing api_key")]
    MissingApiKey(String),

    #[error("No configuration found for provider '{0}'")]
    UnknownProvider(String),

    #[error("No usable provider configured; set an api_key in the config file")]
    NoUsableProvider,
}

/// Errors from reading staged changes and creating commits.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Staging area is empty")]
    StagingEmpty,

    #[error("Failed to collect staged diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("git commit failed ({status}):\n{output}")]
    CommitFailed { status: String, output: String },
}

/// Errors from a single commit message generation attempt.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to encode request: {0}")]
    RequestEncoding(String),

    #[error("Failed to send request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("API request failed (status {status}): {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    ResponseDecode(String),

    #[error("API returned an error: {0}")]
    Api(String),

    #[error("API returned an empty result")]
    EmptyResult,
}

/// Errors that end a generate/review session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
