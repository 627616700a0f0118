//! Clone command - clone into the `<owner>/<repo>` layout

use clap::Args;
use repo_manager_core::{clone_repo, CloneProtocol, Config, RepoUrl};

/// Clone a repository by `owner repo` or by URL
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Either `<owner> <repo>` or a single clone URL
    pub args: Vec<String>,

    /// Clone over ssh
    #[arg(long, conflicts_with = "https")]
    pub ssh: bool,

    /// Clone over https
    #[arg(long)]
    pub https: bool,
}

impl CloneArgs {
    /// Protocol chosen on the command line, if any
    pub fn protocol(&self) -> Option<CloneProtocol> {
        if self.ssh {
            Some(CloneProtocol::Ssh)
        } else if self.https {
            Some(CloneProtocol::Https)
        } else {
            None
        }
    }

    /// Resolve the arguments to a repository and clone URL
    pub fn repo_url(&self, config: &Config) -> anyhow::Result<RepoUrl> {
        match self.args.as_slice() {
            [] => anyhow::bail!("expected args but found none"),
            [url] => Ok(RepoUrl::parse(url, &config.github_registry)?),
            [owner, repo] => Ok(RepoUrl::new(
                owner,
                repo,
                config.default_clone_proto,
                &config.github_registry,
                &config.ssh_user,
            )),
            _ => anyhow::bail!("found more args than expected"),
        }
    }

    /// Execute the clone command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let repo_url = self.repo_url(config)?;
        let path = clone_repo(&repo_url, &config.repo_root)?;

        tracing::info!(url = %repo_url.clone_url, path = %path.display(), "Cloned repository");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> CloneArgs {
        CloneArgs {
            args: values.iter().map(|v| v.to_string()).collect(),
            ssh: false,
            https: false,
        }
    }

    #[test]
    fn test_no_args() {
        let err = args(&[]).repo_url(&Config::default()).unwrap_err();
        assert_eq!(err.to_string(), "expected args but found none");
    }

    #[test]
    fn test_too_many_args() {
        let err = args(&["a", "b", "c"]).repo_url(&Config::default()).unwrap_err();
        assert_eq!(err.to_string(), "found more args than expected");
    }

    #[test]
    fn test_owner_repo_uses_configured_protocol() {
        let config = Config {
            default_clone_proto: CloneProtocol::Https,
            ..Config::default()
        };
        let url = args(&["joshmeranda", "mytools"]).repo_url(&config).unwrap();
        assert_eq!(url.clone_url, "https://github.com/joshmeranda/mytools.git");
    }

    #[test]
    fn test_url_argument() {
        let url = args(&["git@github.com:joshmeranda/mytools.git"])
            .repo_url(&Config::default())
            .unwrap();
        assert_eq!(url.owner, "joshmeranda");
        assert_eq!(url.repo, "mytools");
    }

    #[test]
    fn test_url_on_other_host() {
        let err = args(&["https://gitub.com/joshmeranda/mytools"])
            .repo_url(&Config::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "could not detect owner and repo from url");
    }
}
