//! gmh - draft commit messages for staged changes with an LLM.
//!
//! # Overview
//!
//! gmh reads the staged diff, asks an OpenAI-compatible chat-completion
//! endpoint for a commit message, and lets the user commit, edit, regenerate
//! or cancel before anything is written to the repository.

pub mod config;
pub mod error;
pub mod git;
pub mod interaction;
pub mod provider;
pub mod session;
pub mod text;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{ConfigError, GitError, ProviderError, SessionError};
pub use git::{CommitSink, DiffSource, GitCommitter, StagedDiff};
pub use interaction::{Action, InteractionLoop};
pub use provider::{MessageProvider, OpenAiCompatibleProvider, ProviderConfig};
pub use session::Session;
pub use text::Language;
