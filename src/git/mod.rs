//! Git access: reading the staged diff and creating the commit.

pub mod commit;
pub mod diff;

pub use commit::{CommitSink, GitCommitter};
pub use diff::{DiffSource, StagedDiff};
