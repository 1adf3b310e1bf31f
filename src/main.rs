//! aicommits - CLI entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use aicommits::config::{ConfigAction, ConfigStore, Environment, run_config};
use aicommits::git::{Git, check_git_installed};
use aicommits::llm::DeepSeekClient;
use aicommits::prompt::DialoguerPrompter;
use aicommits::{run_commit, run_explain};

/// Generate Git commit messages using DeepSeek AI.
#[derive(Parser, Debug)]
#[command(name = "aicommits")]
#[command(about = "Generate Git commit messages using DeepSeek AI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pick staged files and commit them with an AI-generated message (default)
    Commit,

    /// Explain the staged changes using AI (pick files)
    Explain,

    /// Manage aicommits config
    Config {
        /// set|get|path
        action: String,

        /// KEY=VALUE for set, or KEY for get
        pair_or_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let env = Environment::from_process();

    match cli.command.unwrap_or(Commands::Commit) {
        Commands::Config {
            action,
            pair_or_key,
        } => {
            let action = match ConfigAction::parse(&action, pair_or_key.as_deref()) {
                Ok(action) => action,
                Err(usage) => {
                    eprintln!("{}", usage);
                    return Ok(ExitCode::from(1));
                }
            };
            let store = ConfigStore::locate(&env).context("Could not locate the config file")?;
            let output = run_config(&store, &action).context("Failed to update config")?;
            println!("{}", output);
        }
        Commands::Commit => {
            let (git, client) = prepare(&env)?;
            run_commit(&git, &client, &mut DialoguerPrompter)
                .await
                .context("Commit failed")?;
        }
        Commands::Explain => {
            let (git, client) = prepare(&env)?;
            run_explain(&git, &client, &mut DialoguerPrompter)
                .await
                .context("Explain failed")?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Check prerequisites and build the git adapter and API client.
///
/// Config values fill in environment variables that are unset.
fn prepare(env: &Environment) -> Result<(Git, DeepSeekClient)> {
    check_git_installed().context("git is required")?;

    let overlay = match ConfigStore::locate(env) {
        Ok(store) => store.overlay(env),
        Err(e) => {
            warn!("Ignoring config file: {}", e);
            env.clone()
        }
    };

    let client = DeepSeekClient::from_env(&overlay).context("Failed to set up the DeepSeek client")?;
    Ok((Git::system(), client))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "aicommits=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
