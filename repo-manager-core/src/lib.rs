//! repo-manager core - housekeeping for a directory of cloned git repositories
//!
//! Repositories live under a single root in an `<owner>/<repo>` layout. This
//! crate discovers them, inspects their remotes and worktree state, evicts
//! stale clones behind a confirmation prompt, and renders a remote listing.

pub mod clean;
pub mod config;
pub mod error;
pub mod git;
pub mod report;
pub mod workspace;

#[cfg(test)]
mod test_support;

pub use clean::{Answer, CleanDecision, CleanOutcome, CleanupConfig, CleanupPlanner, SkipReason};
pub use config::{Config, ConfigOverrides};
pub use error::{Error, Result};
pub use git::{clone_repo, CloneProtocol, Git2Inspector, GitRepo, RemoteInfo, RemoteSet, RepoInspector, RepoUrl};
pub use report::{FleetReporter, ReportRow};
pub use workspace::{discover, last_modified, remove_tree, repo_age, RepoRef, RepoWalker};
