//! The `list` table: one row per clone, one column per remote name

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;

use crate::git::{RemoteSet, RepoInspector};
use crate::workspace::discover;
use crate::Result;

/// Width of the `owner/repo` column
pub const OWNER_REPO_WIDTH: usize = 35;

/// Width of each remote URL column
pub const REMOTE_WIDTH: usize = 50;

/// A listed repository and its remotes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub owner_repo: String,
    pub remotes: RemoteSet,
}

/// Renders the remotes of every clone under a root
#[derive(Debug)]
pub struct FleetReporter<I> {
    inspector: I,
}

impl<I: RepoInspector> FleetReporter<I> {
    pub fn new(inspector: I) -> Self {
        Self { inspector }
    }

    /// One row per repository, sorted by `owner/repo`
    ///
    /// A repository whose remotes cannot be read is kept with no remotes.
    pub fn rows(&self, root: &Path) -> Result<Vec<ReportRow>> {
        let rows = discover(root)?
            .into_iter()
            .map(|repo| {
                let remotes = self.inspector.remotes(&repo.path).unwrap_or_else(|e| {
                    tracing::warn!(repo = %repo, "Failed to read remotes: {}", e);
                    RemoteSet::new()
                });

                ReportRow {
                    owner_repo: repo.id(),
                    remotes,
                }
            })
            .collect();

        Ok(rows)
    }

    /// The full table, newline terminated
    pub fn render(&self, root: &Path) -> Result<String> {
        Ok(render_table(&self.rows(root)?))
    }
}

/// Lay out `rows` under a header of `owner/repo` and the sorted remote names
///
/// Cells are padded to a fixed width but never truncated.
pub fn render_table(rows: &[ReportRow]) -> String {
    let columns: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.remotes.keys().map(String::as_str))
        .collect();

    let mut out = String::new();
    push_row(&mut out, "owner/repo", columns.iter().copied());

    for row in rows {
        let cells = columns
            .iter()
            .map(|name| row.remotes.get(*name).map(String::as_str).unwrap_or(""));
        push_row(&mut out, &row.owner_repo, cells);
    }

    out
}

fn push_row<'a>(out: &mut String, owner_repo: &str, cells: impl Iterator<Item = &'a str>) {
    let _ = write!(out, "{:<width$}", owner_repo, width = OWNER_REPO_WIDTH);
    for cell in cells {
        let _ = write!(out, "{:<width$}", cell, width = REMOTE_WIDTH);
    }
    out.push('\n');
}
