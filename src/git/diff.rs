//! Staged diff collection using git2.

use std::path::{Path, PathBuf};

use git2::{DiffFormat, ErrorCode, Repository, Tree};
use tracing::debug;

use crate::error::GitError;

/// Source of the staged change set.
#[cfg_attr(test, mockall::automock)]
pub trait DiffSource {
    /// Return the staged diff as text.
    ///
    /// Fails with [`GitError::NotARepository`] outside a work tree and
    /// [`GitError::StagingEmpty`] when nothing is staged.
    fn diff(&self) -> Result<String, GitError>;
}

/// Reads `HEAD` vs. index for the repository containing `path`.
#[derive(Debug, Clone)]
pub struct StagedDiff {
    path: PathBuf,
}

impl StagedDiff {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DiffSource for StagedDiff {
    fn diff(&self) -> Result<String, GitError> {
        let repo = open_work_tree(&self.path)?;
        collect_staged_diff(&repo)
    }
}

/// Open the repository around `path`, rejecting bare repositories.
fn open_work_tree(path: &Path) -> Result<Repository, GitError> {
    let repo = match Repository::discover(path) {
        Ok(repo) => repo,
        Err(e) if e.code() == ErrorCode::NotFound => return Err(GitError::NotARepository),
        Err(e) => return Err(GitError::DiffFailed(e)),
    };

    if repo.is_bare() {
        return Err(GitError::NotARepository);
    }
    Ok(repo)
}

/// Resolve the HEAD tree; `None` for a repository with no commits yet.
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, GitError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(GitError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(GitError::DiffFailed)?;
    Ok(Some(tree))
}

/// Unified diff of the index against HEAD, like `git diff --cached`.
pub fn collect_staged_diff(repo: &Repository) -> Result<String, GitError> {
    let head_tree = resolve_head_tree(repo)?;
    let diff = repo
        .diff_tree_to_index(head_tree.as_ref(), None, None)
        .map_err(GitError::DiffFailed)?;

    let mut text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let origin = line.origin();
        if origin == '+' || origin == '-' || origin == ' ' {
            text.push(origin);
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })
    .map_err(GitError::DiffFailed)?;

    let text = text.trim();
    if text.is_empty() {
        return Err(GitError::StagingEmpty);
    }

    debug!(
        "Staged diff: {} files, {} chars",
        diff.deltas().len(),
        text.chars().count()
    );
    Ok(text.to_string())
}
