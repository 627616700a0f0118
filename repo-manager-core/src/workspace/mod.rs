//! The managed repository root and the clones inside it
//!
//! Clones are laid out as `<root>/<owner>/<name>`. Everything in here works
//! on plain filesystem state; git metadata is handled by [`crate::git`].

mod age;
mod remove;
mod scan;

use std::fmt;
use std::path::{Path, PathBuf};

pub use age::{last_modified, repo_age};
pub use remove::remove_tree;
pub use scan::{discover, RepoWalker};

/// A clone discovered under the repository root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// First path segment under the root (user or organization)
    pub owner: String,
    /// Second path segment under the root
    pub name: String,
    /// Absolute path to the working copy
    pub path: PathBuf,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            path: path.into(),
        }
    }

    /// Identity key, `owner/name`
    pub fn id(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
