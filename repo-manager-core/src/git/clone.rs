//! Clone URL construction and cloning into the `<owner>/<repo>` layout

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Transport used when building a clone URL from `owner` and `repo`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloneProtocol {
    #[default]
    Ssh,
    Https,
}

impl fmt::Display for CloneProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloneProtocol::Ssh => f.write_str("ssh"),
            CloneProtocol::Https => f.write_str("https"),
        }
    }
}

impl FromStr for CloneProtocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ssh" => Ok(CloneProtocol::Ssh),
            "https" => Ok(CloneProtocol::Https),
            other => Err(Error::Config(format!("unsupported clone protocol '{}'", other))),
        }
    }
}

/// A repository to clone and where it belongs under the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrl {
    /// Repository owner/organization
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Full clone URL
    pub clone_url: String,
    /// Host (e.g., "github.com")
    pub host: String,
}

impl RepoUrl {
    /// Build the clone URL for `owner/repo` on `registry`
    ///
    /// - ssh: `<ssh_user>@<registry>:<owner>/<repo>.git`
    /// - https: `https://<registry>/<owner>/<repo>.git`
    pub fn new(owner: &str, repo: &str, protocol: CloneProtocol, registry: &str, ssh_user: &str) -> Self {
        let clone_url = match protocol {
            CloneProtocol::Ssh => format!("{}@{}:{}/{}.git", ssh_user, registry, owner, repo),
            CloneProtocol::Https => format!("https://{}/{}/{}.git", registry, owner, repo),
        };

        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            clone_url,
            host: registry.to_string(),
        }
    }

    /// Detect owner and repo from a clone URL hosted on `registry`
    ///
    /// Supports:
    /// - `https://<registry>/owner/repo` (optionally ending in `.git`)
    /// - `ssh://user@<registry>/owner/repo.git`
    /// - `user@<registry>:owner/repo.git`
    ///
    /// The URL itself is kept as given.
    pub fn parse(input: &str, registry: &str) -> Result<Self> {
        let input = input.trim();

        let located = if input.contains("://") {
            url::Url::parse(input).ok().and_then(|url| {
                let host = url.host_str()?.to_string();
                Some((host, url.path().to_string()))
            })
        } else {
            input
                .split_once('@')
                .and_then(|(_, rest)| rest.split_once(':'))
                .map(|(host, path)| (host.to_string(), path.to_string()))
        };

        let parsed = located
            .filter(|(host, _)| host == registry)
            .and_then(|(host, path)| {
                let (owner, repo) = owner_and_repo(&path)?;
                Some(Self {
                    owner,
                    repo,
                    clone_url: input.to_string(),
                    host,
                })
            });

        parsed.ok_or_else(|| Error::Config("could not detect owner and repo from url".to_string()))
    }

    /// Where this repository lives under `root`
    pub fn target_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.owner).join(&self.repo)
    }
}

/// Split `/owner/repo.git` into its two components
fn owner_and_repo(path: &str) -> Option<(String, String)> {
    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    let (owner, repo) = path.split_once('/')?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }

    Some((owner.to_string(), repo.to_string()))
}

/// Clone a repository into `<root>/<owner>/<repo>`
///
/// If the target already exists its remotes are fetched instead.
pub fn clone_repo(repo_url: &RepoUrl, root: &Path) -> Result<PathBuf> {
    let target_dir = repo_url.target_dir(root);

    if target_dir.exists() {
        tracing::info!("{} already exists, fetching instead", target_dir.display());
        fetch_repo(&target_dir)?;
        return Ok(target_dir);
    }

    if let Some(parent) = target_dir.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::path(parent, e))?;
    }

    tracing::debug!(url = %repo_url.clone_url, target = %target_dir.display(), "Cloning");

    let output = Command::new("git")
        .arg("clone")
        .arg(&repo_url.clone_url)
        .arg(&target_dir)
        .output()
        .map_err(|e| Error::Clone(format!("Failed to run git clone: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);

        if stderr.contains("Authentication failed") || stderr.contains("Permission denied") {
            return Err(Error::Clone(format!(
                "Authentication failed for {}. Check your credentials or repository access.",
                repo_url.clone_url
            )));
        }

        if stderr.contains("not found") || stderr.contains("does not exist") {
            return Err(Error::Clone(format!(
                "Repository not found: {}. Check the URL is correct.",
                repo_url.clone_url
            )));
        }

        return Err(Error::Clone(format!("git clone failed: {}", stderr.trim())));
    }

    Ok(target_dir)
}

/// Fetch latest from all remotes of an existing clone
fn fetch_repo(repo_path: &Path) -> Result<()> {
    let output = Command::new("git")
        .arg("fetch")
        .arg("--all")
        .arg("--prune")
        .current_dir(repo_path)
        .output()
        .map_err(|e| Error::Clone(format!("Failed to run git fetch: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::warn!("git fetch failed for {:?}: {}", repo_path, stderr);
    }

    Ok(())
}
