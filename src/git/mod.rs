//! Git operations on the staged change set.

pub mod staged;

pub use staged::{Git, StagedChanges, check_git_installed};
