//! Interactive terminal prompts.
//!
//! The flows talk to the terminal only through [`Prompter`], so they can be
//! driven by a script in tests. [`DialoguerPrompter`] is the real thing.

use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::error::PromptError;

/// What to do with a suggested commit message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Use,
    Edit,
    Cancel,
}

impl ReviewAction {
    pub const ALL: [ReviewAction; 3] = [ReviewAction::Use, ReviewAction::Edit, ReviewAction::Cancel];

    pub fn label(&self) -> &'static str {
        match self {
            ReviewAction::Use => "Use this message and commit",
            ReviewAction::Edit => "Edit message before committing",
            ReviewAction::Cancel => "Cancel",
        }
    }
}

/// Terminal widgets the flows need.
///
/// Aborting a widget resolves to its "nothing" value: an empty selection,
/// [`ReviewAction::Cancel`], `None`, or `false`.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Let the user pick any subset of `files`.
    fn select_files(&mut self, message: &str, files: &[String]) -> Result<Vec<String>, PromptError>;

    /// Ask whether to use, edit or drop the suggestion just shown.
    fn review_action(&mut self) -> Result<ReviewAction, PromptError>;

    /// Free-text edit pre-filled with `initial`. Returned untrimmed.
    fn edit_message(&mut self, initial: &str) -> Result<Option<String>, PromptError>;

    /// Yes/no question.
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError>;
}

/// Prompts rendered with dialoguer on the controlling terminal.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn select_files(&mut self, message: &str, files: &[String]) -> Result<Vec<String>, PromptError> {
        let picked = MultiSelect::new()
            .with_prompt(format!("{} (space to select, enter to confirm)", message))
            .items(files)
            .interact_opt()?;

        Ok(picked
            .unwrap_or_default()
            .into_iter()
            .filter_map(|i| files.get(i).cloned())
            .collect())
    }

    fn review_action(&mut self) -> Result<ReviewAction, PromptError> {
        let labels: Vec<&str> = ReviewAction::ALL.iter().map(|a| a.label()).collect();
        let choice = Select::new()
            .with_prompt("What do you want to do?")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        Ok(choice
            .and_then(|i| ReviewAction::ALL.get(i).copied())
            .unwrap_or(ReviewAction::Cancel))
    }

    fn edit_message(&mut self, initial: &str) -> Result<Option<String>, PromptError> {
        let edited: String = Input::new()
            .with_prompt("Edit commit message")
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()?;
        Ok(Some(edited))
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError> {
        let answer = Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact_opt()?;
        Ok(answer.unwrap_or(false))
    }
}
