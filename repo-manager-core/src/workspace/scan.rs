//! Discovery of `<owner>/<name>` directories under the repository root

use std::fs::{self, DirEntry, ReadDir};
use std::io;
use std::path::{Path, PathBuf};

use super::RepoRef;
use crate::{Error, Result};

/// Lazily walks `<root>/<owner>/<name>`, yielding one [`RepoRef`] per directory
///
/// Entries are yielded in filesystem order; use [`discover`] for the sorted
/// set. Hidden entries and non-directories are ignored at both levels.
#[derive(Debug)]
pub struct RepoWalker {
    owners: Option<ReadDir>,
    current: Option<(String, ReadDir)>,
}

impl RepoWalker {
    /// Start walking `root`
    ///
    /// A missing root produces an empty walk. Any other failure to read the
    /// root is returned as an error. A relative root is resolved against the
    /// current directory so every yielded path is absolute.
    pub fn new(root: &Path) -> Result<Self> {
        let root = std::path::absolute(root).map_err(|e| Error::path(root, e))?;
        let owners = match fs::read_dir(&root) {
            Ok(entries) => Some(entries),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(Error::path(&root, e)),
        };

        Ok(Self {
            owners,
            current: None,
        })
    }
}

impl Iterator for RepoWalker {
    type Item = RepoRef;

    fn next(&mut self) -> Option<RepoRef> {
        loop {
            if let Some((owner, repos)) = &mut self.current {
                for entry in repos.by_ref() {
                    if let Some((name, path)) = visible_dir(entry) {
                        return Some(RepoRef::new(owner.clone(), name, path));
                    }
                }
                self.current = None;
            }

            let entry = self.owners.as_mut()?.next()?;
            let Some((owner, path)) = visible_dir(entry) else {
                continue;
            };

            match fs::read_dir(&path) {
                Ok(repos) => self.current = Some((owner, repos)),
                Err(e) => {
                    tracing::warn!("Skipping unreadable owner directory {:?}: {}", path, e);
                }
            }
        }
    }
}

/// Name and path of a non-hidden directory entry
fn visible_dir(entry: io::Result<DirEntry>) -> Option<(String, PathBuf)> {
    let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
            tracing::warn!("Failed to read directory entry: {}", e);
            return None;
        }
    };

    let name = entry.file_name().into_string().ok()?;
    if name.starts_with('.') {
        return None;
    }

    let path = entry.path();
    path.is_dir().then_some((name, path))
}

/// All repositories under `root`, sorted by `owner/name`
pub fn discover(root: &Path) -> Result<Vec<RepoRef>> {
    let mut repos: Vec<RepoRef> = RepoWalker::new(root)?.collect();
    repos.sort_by_cached_key(RepoRef::id);

    tracing::debug!(root = %root.display(), count = repos.len(), "Discovered repositories");

    Ok(repos)
}
