//! Error types for aicommits modules using thiserror.

use thiserror::Error;

use crate::shell::ShellOutput;

/// Errors from spawning external programs.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but exited non-zero. `message` is its trimmed stderr,
    /// or a generic line when stderr was empty.
    #[error("{message}")]
    Failed { message: String, output: ShellOutput },
}

impl ShellError {
    /// The captured result, when the program got far enough to produce one.
    pub fn output(&self) -> Option<&ShellOutput> {
        match self {
            ShellError::Spawn { .. } => None,
            ShellError::Failed { output, .. } => Some(output),
        }
    }
}

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git not found in PATH. Install git and run aicommits inside a repository.")]
    NotInstalled,

    #[error("git command failed: {0}")]
    Command(#[from] ShellError),

    #[error("Refusing to commit without an explicit file list")]
    NothingToCommit,
}

/// Errors from the chat-completion API.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("DEEPSEEK_API_KEY is undefined. Set it in your environment or run: aicommits config set DEEPSEEK_API_KEY=<key>")]
    MissingApiKey,

    #[error(
        "DeepSeek says your balance is insufficient. Top up your account at https://platform.deepseek.com/ and try again."
    )]
    InsufficientBalance,

    #[error("Unexpected DeepSeek response:\n{0}")]
    UnexpectedResponse(String),

    #[error("Request to DeepSeek failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Errors from the config store.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine a config directory (set XDG_CONFIG_HOME)")]
    NoConfigDir,

    #[error("Failed to create config directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Errors from interactive terminal prompts.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Terminal prompt failed: {0}")]
    Terminal(#[from] dialoguer::Error),
}

/// Bad arguments to the `config` subcommand.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    #[error("Usage: aicommits config set KEY=VALUE")]
    Set,

    #[error("Usage: aicommits config get KEY")]
    Get,

    #[error("Unknown action. Use: set|get|path")]
    UnknownAction(String),
}

/// Errors that end the commit or explain flow.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}
