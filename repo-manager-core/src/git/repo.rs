//! Git repository inspection

use std::path::{Path, PathBuf};

use git2::{Repository, StatusOptions};

use super::RemoteSet;
use crate::{Error, Result};

/// Information about a git remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    /// Name of the remote (e.g., "origin")
    pub name: String,
    /// URL of the remote
    pub url: String,
}

/// A cloned repository opened for inspection
pub struct GitRepo {
    /// The underlying git2 repository
    repo: Repository,
    /// Path to the repository root
    root: PathBuf,
}

impl std::fmt::Debug for GitRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepo")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl GitRepo {
    /// Open the git repository rooted exactly at `path`
    ///
    /// Parent directories are not searched, so a plain directory inside some
    /// other repository is reported as not being a repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let repo = Repository::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                Error::Git(format!("Not a git repository: {}", path.display()))
            } else {
                Error::Git(format!("Failed to open {}: {}", path.display(), e.message()))
            }
        })?;

        let root = repo
            .workdir()
            .ok_or_else(|| Error::Git(format!("Bare repositories are not supported: {}", path.display())))?
            .to_path_buf();

        Ok(Self { repo, root })
    }

    /// List all remotes that have a URL
    pub fn list_remotes(&self) -> Result<Vec<RemoteInfo>> {
        let remotes = self
            .repo
            .remotes()
            .map_err(|e| Error::Git(format!("Failed to list remotes: {}", e.message())))?;

        let mut result = Vec::new();
        for remote_name in remotes.iter().flatten() {
            let remote = self.repo.find_remote(remote_name).map_err(|e| {
                Error::Git(format!("Failed to read remote '{}': {}", remote_name, e.message()))
            })?;

            if let Some(url) = remote.url() {
                result.push(RemoteInfo {
                    name: remote_name.to_string(),
                    url: url.to_string(),
                });
            }
        }

        Ok(result)
    }

    /// Remotes keyed by name
    pub fn remotes(&self) -> Result<RemoteSet> {
        Ok(self
            .list_remotes()?
            .into_iter()
            .map(|remote| (remote.name, remote.url))
            .collect())
    }

    /// Check if the worktree has uncommitted or untracked changes
    ///
    /// Matches a non-empty `git status --porcelain`: ignored files do not count.
    pub fn is_dirty(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(false)
            .include_ignored(false)
            .exclude_submodules(false);

        let statuses = self
            .repo
            .statuses(Some(&mut options))
            .map_err(|e| Error::Git(format!("Failed to read status: {}", e.message())))?;

        Ok(!statuses.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::init_repo;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_non_git_dir() {
        let temp = TempDir::new().unwrap();
        let err = GitRepo::open(temp.path()).unwrap_err();
        assert!(matches!(err, Error::Git(_)));
    }

    #[test]
    fn test_open_does_not_search_upward() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path(), &[]);
        let nested = temp.path().join("joshmeranda").join("fan");
        fs::create_dir_all(&nested).unwrap();

        assert!(GitRepo::open(&nested).is_err());
    }

    #[test]
    fn test_remotes() {
        let temp = TempDir::new().unwrap();
        init_repo(
            temp.path(),
            &[
                ("upstream", "https://github.com/joshmeranda/fan.git"),
                ("origin", "git@github.com:joshmeranda/fan.git"),
            ],
        );

        let repo = GitRepo::open(temp.path()).unwrap();
        let remotes = repo.remotes().unwrap();
        assert_eq!(
            remotes.into_iter().collect::<Vec<_>>(),
            vec![
                ("origin".to_string(), "git@github.com:joshmeranda/fan.git".to_string()),
                ("upstream".to_string(), "https://github.com/joshmeranda/fan.git".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_remotes() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path(), &[]);

        let repo = GitRepo::open(temp.path()).unwrap();
        assert!(repo.remotes().unwrap().is_empty());
    }

    #[test]
    fn test_clean_worktree() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path(), &[]);

        assert!(!GitRepo::open(temp.path()).unwrap().is_dirty().unwrap());
    }

    #[test]
    fn test_untracked_file_is_dirty() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path(), &[]);
        fs::write(temp.path().join("new_file"), "abc").unwrap();

        assert!(GitRepo::open(temp.path()).unwrap().is_dirty().unwrap());
    }

    #[test]
    fn test_modified_file_is_dirty() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path(), &[]);
        fs::write(temp.path().join("README.md"), "changed").unwrap();

        assert!(GitRepo::open(temp.path()).unwrap().is_dirty().unwrap());
    }

    #[test]
    fn test_ignored_file_is_clean() {
        let temp = TempDir::new().unwrap();
        let repo = init_repo(temp.path(), &[]);
        fs::write(temp.path().join(".gitignore"), "target/\n").unwrap();
        {
            let mut index = repo.index().unwrap();
            index.add_path(Path::new(".gitignore")).unwrap();
            index.write().unwrap();
            let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
            let sig = git2::Signature::now("Test", "test@example.com").unwrap();
            let parent = repo.head().unwrap().peel_to_commit().unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "ignore", &tree, &[&parent])
                .unwrap();
        }
        fs::create_dir_all(temp.path().join("target")).unwrap();
        fs::write(temp.path().join("target").join("out"), "").unwrap();

        assert!(!GitRepo::open(temp.path()).unwrap().is_dirty().unwrap());
    }
}
