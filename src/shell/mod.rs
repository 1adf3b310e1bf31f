//! External program execution.
//!
//! Every subprocess the tool starts goes through [`CommandRunner`]: arguments
//! are passed as a list (never through a shell), stdout and stderr are
//! captured as text, and a non-zero exit becomes a [`ShellError::Failed`]
//! unless the caller asks for the raw result.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::ShellError;

/// Captured result of one program run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit status, or -1 when the process was terminated by a signal.
    pub exit_code: i32,
}

impl ShellOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs external programs.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` and return whatever it produced.
    ///
    /// Only fails when the process could not be started.
    async fn run_unchecked(&self, program: &str, args: &[String])
    -> Result<ShellOutput, ShellError>;

    /// Run `program` with `args`, failing on a non-zero exit.
    async fn run(&self, program: &str, args: &[String]) -> Result<ShellOutput, ShellError> {
        let output = self.run_unchecked(program, args).await?;
        check_exit(program, output)
    }
}

/// Turn a non-zero exit into an error carrying the captured output.
pub fn check_exit(program: &str, output: ShellOutput) -> Result<ShellOutput, ShellError> {
    if output.success() {
        return Ok(output);
    }

    let stderr = output.stderr.trim();
    let message = if stderr.is_empty() {
        format!("Command failed: {}", program)
    } else {
        stderr.to_string()
    };

    Err(ShellError::Failed { message, output })
}

/// Spawns real OS processes with tokio.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    current_dir: Option<PathBuf>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every command from `dir` instead of the process working directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            current_dir: Some(dir.into()),
        }
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run_unchecked(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<ShellOutput, ShellError> {
        debug!("Running {} {:?}", program, args);

        let mut cmd = Command::new(program);
        cmd.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|source| ShellError::Spawn {
            program: program.to_string(),
            source,
        })?;

        let result = ShellOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        };

        debug!("{} exited with {}", program, result.exit_code);
        Ok(result)
    }
}
