//! Configuration management for repo-manager
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (REPO_ROOT, CLEAN_AFTER, ...)
//! 3. Config file ($CONFIG or ~/.config/repo-manager/config.toml)
//! 4. Default values

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clean::CleanupConfig;
use crate::git::CloneProtocol;
use crate::{Error, Result};

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Host used when building clone URLs
    pub github_registry: String,

    /// User for ssh clone URLs
    pub ssh_user: String,

    /// Directory holding the `<owner>/<repo>` clones
    pub repo_root: PathBuf,

    /// Days without modification before a clone may be cleaned
    pub clean_after: u32,

    /// Protocol used when cloning from `owner repo`
    pub default_clone_proto: CloneProtocol,

    /// `owner/repo` identities that are never cleaned
    pub do_not_clean: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_registry: "github.com".to_string(),
            ssh_user: "git".to_string(),
            repo_root: dirs::home_dir()
                .map(|home| home.join("repos"))
                .unwrap_or_else(|| PathBuf::from("repos")),
            clean_after: 28,
            default_clone_proto: CloneProtocol::Ssh,
            do_not_clean: Vec::new(),
        }
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub repo_root: Option<PathBuf>,
    pub clean_after: Option<u32>,
    pub clone_proto: Option<CloneProtocol>,
}

impl Config {
    /// Load configuration from `path`, or from the default location
    ///
    /// An explicitly named file must exist. The default file is optional and
    /// defaults are used when it is absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::path(path, e))?;
        let config: Self = toml::from_str(&contents).map_err(|e| {
            Error::Config(format!("Failed to parse config {}: {}", path.display(), e))
        })?;

        if config.clean_after == 0 {
            return Err(Error::Config(format!(
                "invalid clean_after in {}: expected a positive number of days",
                path.display()
            )));
        }

        Ok(config)
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/repo-manager/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("repo-manager").join("config.toml"))
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an environment lookup
    ///
    /// Supported variables:
    /// - GITHUB_REGISTRY, SSH_USER, REPO_ROOT
    /// - CLEAN_AFTER: positive number of days
    /// - DEFAULT_CLONE_PROTO: `ssh` or `https`
    /// - DO_NOT_CLEAN: comma separated `owner/repo` list
    ///
    /// Empty values are treated as unset.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(registry) = var("GITHUB_REGISTRY") {
            self.github_registry = registry;
        }

        if let Some(user) = var("SSH_USER") {
            self.ssh_user = user;
        }

        if let Some(root) = var("REPO_ROOT") {
            self.repo_root = PathBuf::from(root);
        }

        if let Some(days) = var("CLEAN_AFTER") {
            self.clean_after = parse_days(&days).ok_or_else(|| {
                Error::Config(format!(
                    "invalid CLEAN_AFTER '{}': expected a positive number of days",
                    days
                ))
            })?;
        }

        if let Some(proto) = var("DEFAULT_CLONE_PROTO") {
            self.default_clone_proto = proto
                .parse()
                .map_err(|_| Error::Config(format!("unsupported DEFAULT_CLONE_PROTO '{}'", proto)))?;
        }

        if let Some(list) = var("DO_NOT_CLEAN") {
            self.do_not_clean = list
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(self)
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(root) = overrides.repo_root {
            self.repo_root = root;
        }

        if let Some(days) = overrides.clean_after {
            self.clean_after = days;
        }

        if let Some(proto) = overrides.clone_proto {
            self.default_clone_proto = proto;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        Ok(Self::load(path)?
            .with_env_overrides()?
            .with_cli_overrides(overrides))
    }

    /// The settings the cleanup planner runs with
    pub fn cleanup_config(&self, force_yes: bool) -> CleanupConfig {
        CleanupConfig {
            age_threshold_days: self.clean_after,
            do_not_clean: self.do_not_clean.iter().cloned().collect::<BTreeSet<_>>(),
            force_yes,
        }
    }

    /// Render every setting as `KEY: value`, keys right-aligned
    pub fn show(&self) -> String {
        let rows = [
            ("GITHUB_REGISTRY", self.github_registry.clone()),
            ("SSH_USER", self.ssh_user.clone()),
            ("REPO_ROOT", self.repo_root.display().to_string()),
            ("CLEAN_AFTER", self.clean_after.to_string()),
            ("DEFAULT_CLONE_PROTO", self.default_clone_proto.to_string()),
            ("DO_NOT_CLEAN", self.do_not_clean.join(",")),
        ];

        let mut out = String::new();
        for (key, value) in rows {
            let _ = writeln!(out, "{:>20}: {}", key, value);
        }
        out
    }
}

fn parse_days(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|days| *days > 0)
}
