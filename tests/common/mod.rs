//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::path::Path;

use git2::{Repository, Signature};
use gmh::error::GitError;
use gmh::git::CommitSink;
use gmh::provider::ProviderConfig;
use gmh::text::Language;
use serde_json::{Value, json};
use wiremock::MockServer;

/// A throwaway git repository with an identity configured.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a repository with one empty initial commit.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        {
            let mut config = repo.config().expect("Failed to open repo config");
            config
                .set_str("user.name", "Test User")
                .expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
            config
                .set_bool("commit.gpgsign", false)
                .expect("Failed to disable signing");
        }
        {
            let sig = Signature::now("Test User", "test@example.com")
                .expect("Failed to create signature");
            let tree_id = repo
                .index()
                .expect("Failed to get index")
                .write_tree()
                .expect("Failed to write tree");
            let tree = repo.find_tree(tree_id).expect("Failed to find tree");
            repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &[])
                .expect("Failed to create initial commit");
        }
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file and add it to the index.
    pub fn stage(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join(name), content).expect("Failed to write file");
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(name)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Message of the commit HEAD points at.
    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to read HEAD commit")
            .message()
            .unwrap_or_default()
            .to_string()
    }
}

/// Commit sink that records messages instead of committing.
pub struct RecordingSink {
    pub messages: RefCell<Vec<String>>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn succeeding() -> Self {
        Self {
            messages: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            messages: RefCell::new(Vec::new()),
            fail: true,
        }
    }

    pub fn received(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl CommitSink for RecordingSink {
    fn commit(&self, message: &str) -> Result<String, GitError> {
        self.messages.borrow_mut().push(message.to_string());
        if self.fail {
            Err(GitError::CommitFailed {
                status: "exit status: 1".to_string(),
                output: "pre-commit hook rejected the commit".to_string(),
            })
        } else {
            Ok(String::new())
        }
    }
}

/// Provider config pointing at a mock server's API root.
pub fn provider_config(server: &MockServer) -> ProviderConfig {
    let mut config = ProviderConfig::new("mock");
    config.api_key = "sk-test".to_string();
    config.base_url = format!("{}/v1", server.uri());
    config.model = "gpt-test".to_string();
    config.language = Language::English;
    config
}

/// A chat-completion body with a single choice.
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}
