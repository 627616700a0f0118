//! Fixtures shared by unit tests

use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use git2::{Repository, Signature};

use crate::git::{RemoteSet, RepoInspector};
use crate::{Error, Result};

pub fn days(n: u64) -> Duration {
    Duration::from_secs(n * 24 * 60 * 60)
}

pub fn set_mtime(path: &Path, time: SystemTime) {
    File::open(path).unwrap().set_modified(time).unwrap();
}

/// Push the mtime of `path` and everything under it `n` days into the past
pub fn backdate(path: &Path, n: u64) {
    let time = SystemTime::now() - days(n);
    let mut pending = vec![path.to_path_buf()];
    let mut dirs = Vec::new();

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let entry = entry.unwrap();
            if entry.file_type().unwrap().is_dir() {
                pending.push(entry.path());
            } else {
                set_mtime(&entry.path(), time);
            }
        }
        dirs.push(dir);
    }

    for dir in dirs {
        set_mtime(&dir, time);
    }
}

/// Create a git repository at `path` with one commit and the given remotes
pub fn init_repo(path: &Path, remotes: &[(&str, &str)]) -> Repository {
    fs::create_dir_all(path).unwrap();
    let repo = Repository::init(path).unwrap();

    fs::write(path.join("README.md"), "# test\n").unwrap();
    {
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("README.md")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();
    }

    for (name, url) in remotes {
        repo.remote(name, url).unwrap();
    }

    repo
}

/// In-memory [`RepoInspector`] keyed by repository path
#[derive(Debug, Default)]
pub struct FakeInspector {
    remotes: HashMap<PathBuf, RemoteSet>,
    dirty: HashSet<PathBuf>,
    broken: HashSet<PathBuf>,
}

impl FakeInspector {
    pub fn remote(mut self, path: &Path, name: &str, url: &str) -> Self {
        self.remotes
            .entry(path.to_path_buf())
            .or_default()
            .insert(name.to_string(), url.to_string());
        self
    }

    pub fn dirty(mut self, path: &Path) -> Self {
        self.dirty.insert(path.to_path_buf());
        self
    }

    pub fn broken(mut self, path: &Path) -> Self {
        self.broken.insert(path.to_path_buf());
        self
    }

    fn check(&self, path: &Path) -> Result<()> {
        if self.broken.contains(path) {
            return Err(Error::Git(format!("Not a git repository: {}", path.display())));
        }
        Ok(())
    }
}

impl RepoInspector for FakeInspector {
    fn remotes(&self, path: &Path) -> Result<RemoteSet> {
        self.check(path)?;
        Ok(self.remotes.get(path).cloned().unwrap_or_default())
    }

    fn is_dirty(&self, path: &Path) -> Result<bool> {
        self.check(path)?;
        Ok(self.dirty.contains(path))
    }
}
