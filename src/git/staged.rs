//! Staged file listing, scoped diffs and scoped commits.
//!
//! All operations shell out to the system `git` binary through a
//! [`CommandRunner`], inheriting the user's git config and hooks.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::error::GitError;
use crate::shell::{CommandRunner, SystemRunner};

const GIT: &str = "git";

/// The staged change set the commit and explain flows work on.
#[async_trait]
pub trait StagedChanges: Send + Sync {
    /// Paths currently staged, in git's own order.
    async fn staged_files(&self) -> Result<Vec<String>, GitError>;

    /// Unified diff of the staged changes for `paths` only.
    ///
    /// An empty `paths` yields an empty string.
    async fn staged_diff(&self, paths: &[String]) -> Result<String, GitError>;

    /// Commit exactly `paths` with `message`.
    async fn commit(&self, message: &str, paths: &[String]) -> Result<(), GitError>;
}

/// Check that the git binary can be found.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which(GIT).map(|_| ()).map_err(|_| GitError::NotInstalled)
}

/// Git adapter over a command runner.
///
/// ```
/// use aicommits::git::{Git, StagedChanges};
///
/// # tokio_test::block_on(async {
/// // No paths, no subprocess.
/// let diff = Git::system().staged_diff(&[]).await.unwrap();
/// assert_eq!(diff, "");
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct Git<R = SystemRunner> {
    runner: R,
}

impl Git<SystemRunner> {
    /// Git in the process working directory.
    pub fn system() -> Self {
        Self::new(SystemRunner::new())
    }

    /// Git pinned to the repository at `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(SystemRunner::in_dir(dir))
    }
}

impl<R: CommandRunner> Git<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    async fn git(&self, args: Vec<String>) -> Result<String, GitError> {
        let output = self.runner.run(GIT, &args).await?;
        Ok(output.stdout)
    }
}

/// Build `<head...> -- <paths...>`.
fn with_paths(head: &[&str], paths: &[String]) -> Vec<String> {
    let mut args: Vec<String> = head.iter().map(|s| s.to_string()).collect();
    args.push("--".to_string());
    args.extend(paths.iter().cloned());
    args
}

fn parse_name_only(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[async_trait]
impl<R: CommandRunner> StagedChanges for Git<R> {
    async fn staged_files(&self) -> Result<Vec<String>, GitError> {
        let stdout = self
            .git(vec!["diff".into(), "--cached".into(), "--name-only".into()])
            .await?;
        let files = parse_name_only(&stdout);
        debug!("{} staged file(s)", files.len());
        Ok(files)
    }

    async fn staged_diff(&self, paths: &[String]) -> Result<String, GitError> {
        // Without a path filter git would diff the whole index.
        if paths.is_empty() {
            return Ok(String::new());
        }
        self.git(with_paths(&["diff", "--cached"], paths)).await
    }

    async fn commit(&self, message: &str, paths: &[String]) -> Result<(), GitError> {
        if paths.is_empty() {
            return Err(GitError::NothingToCommit);
        }
        self.git(with_paths(&["commit", "-m", message], paths))
            .await?;
        Ok(())
    }
}
