//! Clean command - interactively delete stale clones

use std::io::{self, Write};

use clap::Args;
use repo_manager_core::{CleanupPlanner, Config, Git2Inspector};

/// Delete clones that have not been modified recently
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Delete without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Only consider clones untouched for more than this many days
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub after: Option<u32>,
}

impl CleanArgs {
    /// Execute the clean command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let planner = CleanupPlanner::new(config.cleanup_config(self.yes), Git2Inspector);

        let mut input = io::stdin().lock();
        let mut output = io::stdout().lock();

        let outcomes = planner.run(&config.repo_root, &mut input, &mut output)?;
        output.flush()?;

        let deleted = outcomes.iter().filter(|outcome| outcome.deleted()).count();
        let failed = outcomes.iter().filter(|outcome| outcome.error().is_some()).count();
        tracing::info!(
            repos = outcomes.len(),
            deleted,
            failed,
            "Cleanup finished"
        );

        Ok(())
    }
}
