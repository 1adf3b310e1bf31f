//! The interactive commit loop.
//!
//! Each round: pick a subset of the staged files, diff exactly that subset,
//! ask the model for a message, let the user review it, and commit exactly
//! that subset. The staged set is re-read from git after every commit and
//! after every empty diff, never tracked locally.

use tracing::debug;

use crate::error::FlowError;
use crate::git::StagedChanges;
use crate::llm::Assistant;
use crate::prompt::Prompter;

use super::review::review_or_edit;

pub(crate) const NO_STAGED_CHANGES: &str = "No staged changes found. Use `git add` first.";

/// How the commit loop ended. Every variant is a clean exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Nothing was staged (at start, or after an empty diff emptied the set).
    NothingStaged,
    /// The user confirmed an empty file selection.
    NothingSelected,
    /// The user dropped the suggested message.
    Cancelled,
    /// Every staged file has been committed.
    AllCommitted,
    /// The user declined to commit another subset.
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitReport {
    pub outcome: CommitOutcome,
    /// Commits created before the loop ended.
    pub commits: usize,
}

/// Run the interactive commit loop until one of the [`CommitOutcome`]s.
pub async fn run_commit<S, A, P>(
    repo: &S,
    assistant: &A,
    prompter: &mut P,
) -> Result<CommitReport, FlowError>
where
    S: StagedChanges + ?Sized,
    A: Assistant + ?Sized,
    P: Prompter + ?Sized,
{
    let mut commits = 0;
    let done = |outcome, commits| Ok(CommitReport { outcome, commits });

    let mut remaining = repo.staged_files().await?;
    if remaining.is_empty() {
        println!("{}", NO_STAGED_CHANGES);
        return done(CommitOutcome::NothingStaged, commits);
    }

    loop {
        let picked = prompter.select_files(
            &format!(
                "Select files to include in this commit ({} staged total)",
                remaining.len()
            ),
            &remaining,
        )?;

        if picked.is_empty() {
            println!("No files selected. Exiting.");
            return done(CommitOutcome::NothingSelected, commits);
        }

        println!("Analyzing staged changes...");
        let diff = repo.staged_diff(&picked).await?;

        if diff.trim().is_empty() {
            println!("Selected files produced an empty diff. Try different files.");
            remaining = repo.staged_files().await?;
            if remaining.is_empty() {
                println!("{}", NO_STAGED_CHANGES);
                return done(CommitOutcome::NothingStaged, commits);
            }
            continue;
        }

        debug!("Diff for {} file(s): {} bytes", picked.len(), diff.len());
        let suggestion = assistant.suggest_commit_message(&diff).await?;

        let Some(message) = review_or_edit(prompter, &suggestion)? else {
            println!("Cancelled.");
            return done(CommitOutcome::Cancelled, commits);
        };

        println!("\nCommitting {} file(s): \"{}\"", picked.len(), message);
        repo.commit(&message, &picked).await?;
        commits += 1;

        remaining = repo.staged_files().await?;
        if remaining.is_empty() {
            println!("All staged changes have been committed.");
            return done(CommitOutcome::AllCommitted, commits);
        }

        let again = prompter.confirm(
            &format!(
                "There are still {} staged file(s). Commit another subset?",
                remaining.len()
            ),
            true,
        )?;

        if !again {
            println!("Done.");
            return done(CommitOutcome::Stopped, commits);
        }
    }
}
