//! repo-manager CLI - Command line interface for repo-manager
//!
//! Clones repositories into an `<owner>/<repo>` layout, cleans out stale
//! clones and lists the remotes of everything under the root.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use repo_manager_core::{Config, ConfigOverrides};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{CleanArgs, CloneArgs, ListArgs};

/// repo-manager: keep a directory of git clones tidy
#[derive(Parser, Debug)]
#[command(name = "repo-manager")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to load instead of ~/.config/repo-manager/config.toml
    #[arg(long, global = true, env = "CONFIG")]
    config: Option<PathBuf>,

    /// Repository root (overrides config and env)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Show current configuration (same as the `config` command)
    #[arg(long, global = true, hide = true)]
    show_config: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Clone a repository into <root>/<owner>/<repo>
    Clone(CloneArgs),

    /// Delete clones that have not been touched recently
    Clean(CleanArgs),

    /// List every clone and its remotes
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show current configuration
    #[command(alias = "show-config")]
    Config,
}

impl Cli {
    /// Flags that take precedence over the environment and config file
    fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides {
            repo_root: self.root.clone(),
            ..ConfigOverrides::default()
        };

        match &self.command {
            Some(Commands::Clean(args)) => overrides.clean_after = args.after,
            Some(Commands::Clone(args)) => overrides.clone_proto = args.protocol(),
            _ => {}
        }

        overrides
    }

    /// Whether the configuration should be printed instead of running a command
    fn shows_config(&self) -> bool {
        self.show_config || matches!(self.command, Some(Commands::Config))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries prompts and tables, so logs go to stderr
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = Config::load_with_overrides(cli.config.as_deref(), cli.overrides())?;

    tracing::debug!(
        root = %config.repo_root.display(),
        clean_after = config.clean_after,
        registry = %config.github_registry,
        "Configuration loaded"
    );

    if cli.shows_config() {
        print!("{}", config.show());
        return Ok(());
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("repo-manager {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Clone(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Clean(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::List(args)) => {
            args.execute(&config).await?;
        }
        // printed above
        Some(Commands::Config) => {}
        None => {
            println!("repo-manager - keep a directory of git clones tidy");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
