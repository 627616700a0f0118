//! Eviction of stale clones
//!
//! A clone is a *candidate* once nothing under it has been modified for
//! longer than the configured threshold. Candidates are then skipped,
//! confirmed or declined one at a time, in `owner/repo` order.

mod planner;
mod prompt;

use std::collections::BTreeSet;
use std::fmt;

pub use planner::{CleanOutcome, CleanupPlanner};
pub use prompt::{confirm_delete, Answer};

use crate::workspace::RepoRef;

/// Settings for one cleanup run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupConfig {
    /// Clones untouched for longer than this many days are candidates
    pub age_threshold_days: u32,
    /// `owner/repo` identities that are never deleted
    pub do_not_clean: BTreeSet<String>,
    /// Delete without prompting
    pub force_yes: bool,
}

/// Why a candidate was left alone without asking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    DoNotClean,
    UncleanWorktree,
    NoRemotes,
}

impl SkipReason {
    /// The line printed when `repo` is skipped for this reason
    pub fn notice(&self, repo: &RepoRef) -> String {
        match self {
            SkipReason::DoNotClean => format!("skipping {}", repo),
            SkipReason::UncleanWorktree => {
                format!("repo '{}' has an unclean worktree, skipping", repo)
            }
            SkipReason::NoRemotes => format!("repo '{}' has no remotes, skipping", repo),
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::DoNotClean => f.write_str("do-not-clean listed"),
            SkipReason::UncleanWorktree => f.write_str("unclean worktree"),
            SkipReason::NoRemotes => f.write_str("no remotes"),
        }
    }
}

/// What happened to a single repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanDecision {
    /// Not old enough; never mentioned in output
    Ineligible,
    Skipped(SkipReason),
    ConfirmedDelete,
    DeclinedDelete,
}
