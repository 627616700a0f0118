//! Staleness of a clone, measured from the newest mtime anywhere inside it

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use crate::{Error, Result};

/// Most recent modification time of `path` or anything beneath it
///
/// Directories count as well as files. Symbolic links below `path` are
/// inspected themselves and never followed.
pub fn last_modified(path: &Path) -> Result<SystemTime> {
    let meta = fs::metadata(path).map_err(|e| Error::path(path, e))?;
    let mut latest = meta.modified().map_err(|e| Error::path(path, e))?;

    if !meta.is_dir() {
        return Ok(latest);
    }

    let mut pending = vec![path.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).map_err(|e| Error::path(&dir, e))? {
            let entry = entry.map_err(|e| Error::path(&dir, e))?;
            let entry_path = entry.path();
            let meta = entry.metadata().map_err(|e| Error::path(&entry_path, e))?;

            let modified = meta.modified().map_err(|e| Error::path(&entry_path, e))?;
            latest = latest.max(modified);

            if meta.is_dir() {
                pending.push(entry_path);
            }
        }
    }

    Ok(latest)
}

/// Time elapsed between the newest modification under `path` and `now`
///
/// Modification times later than `now` count as zero age.
pub fn repo_age(path: &Path, now: SystemTime) -> Result<Duration> {
    let modified = last_modified(path)?;
    Ok(now.duration_since(modified).unwrap_or(Duration::ZERO))
}
