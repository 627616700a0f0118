//! Candidate selection, skip checks and deletion

use std::io::{BufRead, Write};
use std::path::Path;
use std::time::{Duration, SystemTime};

use super::prompt::confirm_delete;
use super::{CleanDecision, CleanupConfig, SkipReason};
use crate::git::RepoInspector;
use crate::workspace::{discover, remove_tree, repo_age, RepoRef};
use crate::{Error, Result};

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// The result of processing one repository
#[derive(Debug)]
pub struct CleanOutcome {
    pub repo: RepoRef,
    /// The decision, or why the repository could not be inspected or deleted
    pub result: Result<CleanDecision>,
}

/// Where a repository stands before anyone is asked about it
enum Verdict {
    Ineligible,
    Skip(SkipReason),
    Eligible,
}

/// Runs a cleanup pass over a repository root
#[derive(Debug)]
pub struct CleanupPlanner<I> {
    config: CleanupConfig,
    inspector: I,
    now: SystemTime,
}

impl<I: RepoInspector> CleanupPlanner<I> {
    /// Create a planner that measures ages against the current time
    pub fn new(config: CleanupConfig, inspector: I) -> Self {
        Self {
            config,
            inspector,
            now: SystemTime::now(),
        }
    }

    /// Measure ages against `now` instead of the current time
    pub fn at(mut self, now: SystemTime) -> Self {
        self.now = now;
        self
    }

    /// Age a repository must exceed to become a candidate
    pub fn threshold(&self) -> Duration {
        Duration::from_secs(u64::from(self.config.age_threshold_days) * SECS_PER_DAY)
    }

    /// Process every repository under `root` in `owner/repo` order
    ///
    /// Prompts and notices go to `output`; answers are read from `input`.
    /// Failures on a single repository are reported on `output` and the pass
    /// continues. Only an unreadable root or a broken input/output stream
    /// ends the run early.
    pub fn run<R, W>(&self, root: &Path, input: &mut R, output: &mut W) -> Result<Vec<CleanOutcome>>
    where
        R: BufRead + ?Sized,
        W: Write + ?Sized,
    {
        let mut outcomes = Vec::new();

        for repo in discover(root)? {
            let result = self.process(&repo, input, output)?;

            match &result {
                Ok(decision) => {
                    tracing::debug!(repo = %repo, ?decision, "Processed repository");
                }
                Err(e) => {
                    tracing::warn!(repo = %repo, "Cleanup failed: {}", e);
                }
            }

            outcomes.push(CleanOutcome { repo, result });
        }

        Ok(outcomes)
    }

    /// Decide on and act upon a single repository
    ///
    /// The outer error is fatal to the run; the inner one belongs to `repo`.
    fn process<R, W>(
        &self,
        repo: &RepoRef,
        input: &mut R,
        output: &mut W,
    ) -> Result<Result<CleanDecision>>
    where
        R: BufRead + ?Sized,
        W: Write + ?Sized,
    {
        let verdict = match self.verdict(repo) {
            Ok(verdict) => verdict,
            Err(e) => {
                writeln!(output, "failed to inspect '{}': {}", repo, e)?;
                return Ok(Err(e));
            }
        };

        match verdict {
            Verdict::Ineligible => return Ok(Ok(CleanDecision::Ineligible)),
            Verdict::Skip(reason) => {
                writeln!(output, "{}", reason.notice(repo))?;
                return Ok(Ok(CleanDecision::Skipped(reason)));
            }
            Verdict::Eligible => {}
        }

        if !self.config.force_yes && !confirm_delete(repo, input, output)? {
            return Ok(Ok(CleanDecision::DeclinedDelete));
        }

        match remove_tree(&repo.path) {
            Ok(()) => Ok(Ok(CleanDecision::ConfirmedDelete)),
            Err(e) => {
                writeln!(output, "failed to delete '{}': {}", repo, e)?;
                Ok(Err(e))
            }
        }
    }

    /// Run the age check and then the skip checks, in priority order
    fn verdict(&self, repo: &RepoRef) -> Result<Verdict> {
        let age = repo_age(&repo.path, self.now)?;
        if age <= self.threshold() {
            return Ok(Verdict::Ineligible);
        }

        if self.config.do_not_clean.contains(&repo.id()) {
            return Ok(Verdict::Skip(SkipReason::DoNotClean));
        }

        if self.inspector.is_dirty(&repo.path)? {
            return Ok(Verdict::Skip(SkipReason::UncleanWorktree));
        }

        if self.inspector.remotes(&repo.path)?.is_empty() {
            return Ok(Verdict::Skip(SkipReason::NoRemotes));
        }

        Ok(Verdict::Eligible)
    }
}

impl CleanOutcome {
    /// Whether the repository was removed from disk
    pub fn deleted(&self) -> bool {
        matches!(self.result, Ok(CleanDecision::ConfirmedDelete))
    }

    /// The error, if processing this repository failed
    pub fn error(&self) -> Option<&Error> {
        self.result.as_ref().err()
    }
}
