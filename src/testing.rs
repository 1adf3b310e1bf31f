//! In-memory stand-ins for git and the language model, shared by flow tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{GitError, LlmError};
use crate::git::StagedChanges;
use crate::llm::Assistant;

/// A staged change set held in memory.
///
/// Committing removes the committed paths from the staged set. Changes
/// registered with [`FakeRepo::on_listing`] are applied right before the
/// n-th listing, as if someone ran `git add` or `git restore --staged`
/// between two prompts.
#[derive(Default)]
pub struct FakeRepo {
    staged: Mutex<Vec<String>>,
    diffs: HashMap<String, String>,
    external: Mutex<Vec<(usize, External)>>,
    commits: Mutex<Vec<(String, Vec<String>)>>,
    listings: Mutex<usize>,
}

/// A change to the index made outside the flow under test.
#[derive(Debug, Clone)]
pub enum External {
    Stage(&'static str),
    Unstage(&'static str),
}

impl FakeRepo {
    /// Staged files with their diff text, in listing order.
    pub fn new(files: &[(&str, &str)]) -> Self {
        Self {
            staged: Mutex::new(files.iter().map(|(p, _)| p.to_string()).collect()),
            diffs: files
                .iter()
                .map(|(p, d)| (p.to_string(), d.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    /// Apply `change` just before listing number `listing` (1-based).
    pub fn on_listing(&self, listing: usize, change: External) {
        self.external.lock().unwrap().push((listing, change));
    }

    pub fn staged(&self) -> Vec<String> {
        self.staged.lock().unwrap().clone()
    }

    pub fn commits(&self) -> Vec<(String, Vec<String>)> {
        self.commits.lock().unwrap().clone()
    }

    pub fn listings(&self) -> usize {
        *self.listings.lock().unwrap()
    }
}

#[async_trait]
impl StagedChanges for FakeRepo {
    async fn staged_files(&self) -> Result<Vec<String>, GitError> {
        let listing = {
            let mut count = self.listings.lock().unwrap();
            *count += 1;
            *count
        };

        let mut staged = self.staged.lock().unwrap();
        for (at, change) in self.external.lock().unwrap().iter() {
            if *at != listing {
                continue;
            }
            match change {
                External::Stage(path) => staged.push(path.to_string()),
                External::Unstage(path) => staged.retain(|p| p != path),
            }
        }
        Ok(staged.clone())
    }

    async fn staged_diff(&self, paths: &[String]) -> Result<String, GitError> {
        let staged = self.staged.lock().unwrap();
        Ok(paths
            .iter()
            .filter(|p| staged.contains(*p))
            .filter_map(|p| self.diffs.get(p))
            .cloned()
            .collect())
    }

    async fn commit(&self, message: &str, paths: &[String]) -> Result<(), GitError> {
        if paths.is_empty() {
            return Err(GitError::NothingToCommit);
        }
        self.staged.lock().unwrap().retain(|p| !paths.contains(p));
        self.commits
            .lock()
            .unwrap()
            .push((message.to_string(), paths.to_vec()));
        Ok(())
    }
}

/// Answers every request with the same text, or a billing error when `None`.
pub struct FakeAssistant {
    reply: Option<String>,
    seen: Mutex<Vec<String>>,
}

impl FakeAssistant {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn out_of_credit() -> Self {
        Self {
            reply: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Diffs received so far.
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    fn answer(&self, diff: &str) -> Result<String, LlmError> {
        self.seen.lock().unwrap().push(diff.to_string());
        self.reply.clone().ok_or(LlmError::InsufficientBalance)
    }
}

#[async_trait]
impl Assistant for FakeAssistant {
    async fn suggest_commit_message(&self, diff: &str) -> Result<String, LlmError> {
        self.answer(diff)
    }

    async fn explain_diff(&self, diff: &str) -> Result<String, LlmError> {
        self.answer(diff)
    }
}

pub fn paths(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
