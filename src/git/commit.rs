//! Commit creation by shelling out to the system `git` binary.
//!
//! Going through `git commit` keeps the user's hooks, signing setup and
//! identity config in play, which `git2` would bypass.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

/// Something that can turn the final message into a commit.
#[cfg_attr(test, mockall::automock)]
pub trait CommitSink {
    /// Commit the staged changes with `message`.
    ///
    /// Returns the process output on success so it can be shown to the user.
    fn commit(&self, message: &str) -> Result<String, GitError>;
}

/// Runs `git commit -m <message>` in a working directory.
#[derive(Debug, Clone)]
pub struct GitCommitter {
    workdir: PathBuf,
}

impl GitCommitter {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl CommitSink for GitCommitter {
    fn commit(&self, message: &str) -> Result<String, GitError> {
        debug!("Running git commit in {}", self.workdir.display());
        let output = Command::new("git")
            .args(["commit", "-m", message])
            .current_dir(&self.workdir)
            .output()
            .map_err(|source| GitError::SpawnFailed {
                operation: "commit",
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(GitError::CommitFailed {
                status: output.status.to_string(),
                output: combined.trim_end().to_string(),
            });
        }

        Ok(combined)
    }
}
