//! Version control collaborator for the initializer
//!
//! Handles:
//! - Reading the configured remote URL
//! - Staging and committing the initialized tree
//!
//! The initializer only talks to [`VersionControl`], so tests can swap in
//! a fake instead of running git.

mod operations;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use operations::is_git_repo;

/// Narrow capability the initializer needs from version control
pub trait VersionControl {
    /// URL of the named remote
    fn remote_url(&self, remote: &str) -> Result<String>;

    /// Stage every change and commit it
    fn commit_all(&self, message: &str) -> Result<()>;
}

/// `VersionControl` backed by the git binary, run inside `root`
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl VersionControl for GitCli {
    fn remote_url(&self, remote: &str) -> Result<String> {
        operations::remote_url(&self.root, remote)
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        operations::add_all(&self.root)?;
        operations::commit(&self.root, message)
    }
}

/// Repository URL for substitution, or "" when it can't be read
pub fn derive_repository_url(vcs: &dyn VersionControl, remote: &str) -> String {
    vcs.remote_url(remote)
        .map(|url| normalize_remote_url(&url))
        .unwrap_or_default()
}

/// Turn a remote URL into a browsable HTTPS URL
///
/// `git@github.com:owner/repo.git` and `https://github.com/owner/repo.git`
/// both become `https://github.com/owner/repo`.
pub fn normalize_remote_url(url: &str) -> String {
    let trimmed = url.trim();
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    if let Some(path) = trimmed.strip_prefix("git@github.com:") {
        return format!("https://github.com/{path}");
    }
    if let Some(path) = trimmed.strip_prefix("ssh://git@github.com/") {
        return format!("https://github.com/{path}");
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoRemote;

    impl VersionControl for NoRemote {
        fn remote_url(&self, remote: &str) -> Result<String> {
            anyhow::bail!("Remote '{}' not found", remote)
        }

        fn commit_all(&self, _message: &str) -> Result<()> {
            Ok(())
        }
    }

    struct FixedRemote(&'static str);

    impl VersionControl for FixedRemote {
        fn remote_url(&self, _remote: &str) -> Result<String> {
            Ok(self.0.to_string())
        }

        fn commit_all(&self, _message: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_missing_remote_yields_empty_url() {
        assert_eq!(derive_repository_url(&NoRemote, "origin"), "");
    }

    #[test]
    fn test_remote_url_is_normalized() {
        let vcs = FixedRemote("git@github.com:someone/my_model.git\n");
        assert_eq!(
            derive_repository_url(&vcs, "origin"),
            "https://github.com/someone/my_model"
        );
    }

    #[test]
    fn test_normalize_remote_url() {
        assert_eq!(
            normalize_remote_url("https://github.com/owner/repo.git"),
            "https://github.com/owner/repo"
        );
        assert_eq!(
            normalize_remote_url("ssh://git@github.com/owner/repo.git"),
            "https://github.com/owner/repo"
        );
        assert_eq!(
            normalize_remote_url("https://gitlab.com/owner/repo"),
            "https://gitlab.com/owner/repo"
        );
    }
}
