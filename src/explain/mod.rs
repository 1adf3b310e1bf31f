//! The `explain` subcommand: a single read-only pass over the staged diff.

use tracing::debug;

use crate::error::FlowError;
use crate::git::StagedChanges;
use crate::llm::Assistant;
use crate::prompt::Prompter;

/// How an explain run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplainOutcome {
    NothingStaged,
    /// The picked files had no textual diff.
    EmptyDiff,
    Explained(String),
}

/// Explain the staged changes of a user-picked subset.
///
/// Unlike the commit loop, an empty pick means "everything staged"
/// rather than "stop".
pub async fn run_explain<S, A, P>(
    repo: &S,
    assistant: &A,
    prompter: &mut P,
) -> Result<ExplainOutcome, FlowError>
where
    S: StagedChanges + ?Sized,
    A: Assistant + ?Sized,
    P: Prompter + ?Sized,
{
    let files = repo.staged_files().await?;
    if files.is_empty() {
        println!("No staged changes found.");
        return Ok(ExplainOutcome::NothingStaged);
    }

    let picked = prompter.select_files(
        &format!("Select files to explain ({} staged total)", files.len()),
        &files,
    )?;

    println!("Analyzing staged changes...");
    let target = if picked.is_empty() { &files } else { &picked };
    debug!("Explaining {} of {} staged file(s)", target.len(), files.len());

    let diff = repo.staged_diff(target).await?;
    if diff.trim().is_empty() {
        println!("Empty diff.");
        return Ok(ExplainOutcome::EmptyDiff);
    }

    let explanation = assistant.explain_diff(&diff).await?;
    println!("\nAI Explanation:\n{}\n", explanation);
    Ok(ExplainOutcome::Explained(explanation))
}
