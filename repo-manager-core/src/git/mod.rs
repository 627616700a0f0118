//! Git operations for repo-manager
//!
//! This module provides remote and worktree inspection of cloned repositories,
//! plus clone URL construction and cloning into the `<owner>/<repo>` layout.

mod clone;
mod repo;

use std::collections::BTreeMap;
use std::path::Path;

pub use clone::{clone_repo, CloneProtocol, RepoUrl};
pub use repo::{GitRepo, RemoteInfo};

use crate::Result;

/// Remote name to URL, ordered by remote name
pub type RemoteSet = BTreeMap<String, String>;

/// The git state the cleanup planner and fleet reporter depend on
pub trait RepoInspector {
    /// Named remotes of the repository at `path`
    ///
    /// An unreadable or missing repository is an error, never an empty set.
    fn remotes(&self, path: &Path) -> Result<RemoteSet>;

    /// Whether the worktree at `path` has staged, unstaged or untracked changes
    fn is_dirty(&self, path: &Path) -> Result<bool>;
}

/// [`RepoInspector`] backed by libgit2
#[derive(Debug, Clone, Copy, Default)]
pub struct Git2Inspector;

impl RepoInspector for Git2Inspector {
    fn remotes(&self, path: &Path) -> Result<RemoteSet> {
        GitRepo::open(path)?.remotes()
    }

    fn is_dirty(&self, path: &Path) -> Result<bool> {
        GitRepo::open(path)?.is_dirty()
    }
}
