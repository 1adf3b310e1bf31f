//! The `config` subcommand.

use crate::error::{ConfigError, UsageError};

use super::store::ConfigStore;

/// A parsed `config <action> [pairOrKey]` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    Path,
    Set { key: String, value: String },
    Get { key: String },
}

impl ConfigAction {
    /// Parse the literal action name and its optional argument.
    ///
    /// `set` splits on the first `=` only, so values may contain `=`.
    pub fn parse(action: &str, arg: Option<&str>) -> Result<Self, UsageError> {
        match action {
            "path" => Ok(ConfigAction::Path),
            "set" => {
                let (key, value) = arg.and_then(|a| a.split_once('=')).ok_or(UsageError::Set)?;
                if key.is_empty() {
                    return Err(UsageError::Set);
                }
                Ok(ConfigAction::Set {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            }
            "get" => match arg {
                Some(key) if !key.is_empty() => Ok(ConfigAction::Get {
                    key: key.to_string(),
                }),
                _ => Err(UsageError::Get),
            },
            other => Err(UsageError::UnknownAction(other.to_string())),
        }
    }
}

/// Execute `action` against `store` and return the line to print.
pub fn run_config(store: &ConfigStore, action: &ConfigAction) -> Result<String, ConfigError> {
    match action {
        ConfigAction::Path => Ok(store.path().display().to_string()),
        ConfigAction::Set { key, value } => {
            store.set(key, value)?;
            Ok(format!("Saved {} to {}", key, store.path().display()))
        }
        ConfigAction::Get { key } => Ok(store.get(key).unwrap_or_default()),
    }
}
