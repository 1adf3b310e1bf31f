//! Review or edit a suggested commit message.

use crate::error::PromptError;
use crate::prompt::{Prompter, ReviewAction};

/// Show `suggestion` and let the user use, edit or drop it.
///
/// Returns `None` when the user cancels or edits the message down to nothing.
pub fn review_or_edit<P: Prompter + ?Sized>(
    prompter: &mut P,
    suggestion: &str,
) -> Result<Option<String>, PromptError> {
    println!("\nSuggested commit message:\n\"{}\"\n", suggestion);

    match prompter.review_action()? {
        ReviewAction::Use => Ok(Some(suggestion.to_string())),
        ReviewAction::Cancel => Ok(None),
        ReviewAction::Edit => Ok(prompter
            .edit_message(suggestion)?
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::MockPrompter;

    #[test]
    fn test_use_returns_suggestion_unchanged() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_review_action()
            .times(1)
            .returning(|| Ok(ReviewAction::Use));
        prompter.expect_edit_message().never();

        let result = review_or_edit(&mut prompter, "Fix bug in a").unwrap();
        assert_eq!(result.as_deref(), Some("Fix bug in a"));
    }

    #[test]
    fn test_edit_prefills_and_trims() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_review_action()
            .returning(|| Ok(ReviewAction::Edit));
        prompter
            .expect_edit_message()
            .withf(|initial| initial == "Fix bug")
            .times(1)
            .returning(|_| Ok(Some("  Fix parser bug in a  \n".to_string())));

        let result = review_or_edit(&mut prompter, "Fix bug").unwrap();
        assert_eq!(result.as_deref(), Some("Fix parser bug in a"));
    }

    #[test]
    fn test_edit_to_blank_is_cancellation() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_review_action()
            .returning(|| Ok(ReviewAction::Edit));
        prompter
            .expect_edit_message()
            .returning(|_| Ok(Some("   ".to_string())));

        assert_eq!(review_or_edit(&mut prompter, "Fix bug").unwrap(), None);
    }

    #[test]
    fn test_aborted_edit_is_cancellation() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_review_action()
            .returning(|| Ok(ReviewAction::Edit));
        prompter.expect_edit_message().returning(|_| Ok(None));

        assert_eq!(review_or_edit(&mut prompter, "Fix bug").unwrap(), None);
    }

    #[test]
    fn test_cancel_returns_none() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_review_action()
            .returning(|| Ok(ReviewAction::Cancel));
        prompter.expect_edit_message().never();

        assert_eq!(review_or_edit(&mut prompter, "Fix bug").unwrap(), None);
    }
}
