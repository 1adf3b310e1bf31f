//! aicommits - commit staged changes in reviewed subsets with AI-written messages.
//!
//! # Overview
//!
//! aicommits lists the files staged in git, lets the user pick a subset, asks
//! the DeepSeek chat-completion API for a commit message describing exactly
//! that subset, and commits it once the user accepts or edits the message.
//! The `explain` subcommand asks for a prose explanation of the staged diff
//! instead, and `config` manages a small JSON file of settings that act as
//! fallbacks for environment variables.

pub mod commit;
pub mod config;
pub mod error;
pub mod explain;
pub mod git;
pub mod llm;
pub mod prompt;
pub mod shell;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use commit::{CommitOutcome, CommitReport, run_commit};
pub use config::{ConfigAction, ConfigStore, Environment};
pub use error::{ConfigError, FlowError, GitError, LlmError, PromptError, ShellError, UsageError};
pub use explain::{ExplainOutcome, run_explain};
pub use git::{Git, StagedChanges};
pub use llm::{Assistant, DeepSeekClient};
pub use prompt::{DialoguerPrompter, Prompter, ReviewAction};
pub use shell::{CommandRunner, ShellOutput, SystemRunner};
