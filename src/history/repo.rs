//! Repository discovery from the `origin` remote.

use std::path::Path;
use std::process::Command;

use crate::error::{Result, SlimifyError};

const GITHUB_HOST: &str = "github.com";

/// A GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    /// Host name, `github.com` or a GitHub Enterprise Server host.
    pub host: String,
    pub owner: String,
    pub name: String,
}

impl RepoInfo {
    /// Determine the repository from `git remote get-url origin` in
    /// `project_root`.
    ///
    /// # Errors
    ///
    /// `RepoDiscovery` when git fails or the remote URL isn't recognized.
    pub fn discover(project_root: &Path) -> Result<Self> {
        let output = Command::new("git")
            .args(["remote", "get-url", "origin"])
            .current_dir(project_root)
            .output()
            .map_err(|e| SlimifyError::RepoDiscovery {
                message: format!("failed to run git: {}", e),
            })?;

        if !output.status.success() {
            return Err(SlimifyError::RepoDiscovery {
                message: format!(
                    "failed to get git remote: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Self::parse_remote(&url).ok_or_else(|| SlimifyError::RepoDiscovery {
            message: format!("failed to parse repository info from remote: {}", url),
        })
    }

    /// Parse a remote URL.
    ///
    /// Accepts `https://host/owner/repo`, `git@host:owner/repo` and
    /// `ssh://git@host[:port]/owner/repo`, each with or without `.git`.
    ///
    /// ```
    /// use slimify::history::RepoInfo;
    ///
    /// let repo = RepoInfo::parse_remote("git@github.com:octo/hello.git").unwrap();
    /// assert_eq!((repo.owner.as_str(), repo.name.as_str()), ("octo", "hello"));
    /// ```
    pub fn parse_remote(url: &str) -> Option<Self> {
        let url = url.trim();

        let (host, path) = if let Some(rest) = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .or_else(|| url.strip_prefix("ssh://"))
        {
            let (authority, path) = rest.split_once('/')?;
            let host = authority.rsplit('@').next().unwrap_or(authority);
            let host = host.split(':').next().unwrap_or(host);
            (host, path)
        } else if let Some(rest) = url.strip_prefix("git@") {
            rest.split_once(':')?
        } else {
            return None;
        };

        let mut parts = path.trim_end_matches('/').split('/');
        let owner = parts.next()?;
        let name = parts.next()?.trim_end_matches(".git");
        if host.is_empty() || owner.is_empty() || name.is_empty() {
            return None;
        }

        Some(Self {
            host: host.to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// REST API base URL for the host.
    pub fn api_base_url(&self) -> String {
        if self.host == GITHUB_HOST {
            "https://api.github.com".to_string()
        } else {
            format!("https://{}/api/v3", self.host)
        }
    }
}
