//! The `commit` subcommand: commit staged changes in reviewed subsets.

pub mod flow;
pub mod review;

pub use flow::{CommitOutcome, CommitReport, run_commit};
pub use review::review_or_edit;
