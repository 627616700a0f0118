//! Recursive deletion of a clone

use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Remove `path` and everything beneath it
///
/// Files are unlinked while walking; directories are removed afterwards,
/// deepest first. A symbolic link at `path` is removed without touching its
/// target.
pub fn remove_tree(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| Error::path(path, e))?;
    if !meta.is_dir() {
        return fs::remove_file(path).map_err(|e| Error::path(path, e));
    }

    let mut pending = vec![path.to_path_buf()];
    let mut visited = Vec::new();

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).map_err(|e| Error::path(&dir, e))? {
            let entry = entry.map_err(|e| Error::path(&dir, e))?;
            let entry_path = entry.path();
            let file_type = entry.file_type().map_err(|e| Error::path(&entry_path, e))?;

            if file_type.is_dir() {
                pending.push(entry_path);
            } else {
                fs::remove_file(&entry_path).map_err(|e| Error::path(&entry_path, e))?;
            }
        }
        visited.push(dir);
    }

    // a directory is always visited after its parent
    for dir in visited.iter().rev() {
        fs::remove_dir(dir).map_err(|e| Error::path(dir, e))?;
    }

    Ok(())
}
