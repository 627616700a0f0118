//! List command - show every clone and its remotes

use clap::Args;
use repo_manager_core::{Config, FleetReporter, Git2Inspector};

/// List clones under the repository root
#[derive(Args, Debug)]
pub struct ListArgs {}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let table = FleetReporter::new(Git2Inspector).render(&config.repo_root)?;
        print!("{}", table);
        Ok(())
    }
}
