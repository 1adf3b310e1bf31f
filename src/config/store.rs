//! JSON key/value store under the per-user config directory.
//!
//! Reads never fail: a missing, unreadable or corrupt file behaves like an
//! empty store. Only writes report errors.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ConfigError;

use super::env::Environment;

/// Directory name under the config base.
pub const APP_DIR: &str = "aicommits";

/// File name inside [`APP_DIR`].
pub const CONFIG_FILE: &str = "config.json";

/// Variable overriding the config base directory.
pub const CONFIG_HOME_VAR: &str = "XDG_CONFIG_HOME";

/// Resolve the config base directory.
///
/// `XDG_CONFIG_HOME` from the overlay wins, then the platform config
/// directory, then `~/.config`.
pub fn config_base(env: &Environment) -> Option<PathBuf> {
    if let Some(base) = env.get(CONFIG_HOME_VAR).filter(|b| !b.is_empty()) {
        return Some(PathBuf::from(base));
    }
    dirs::config_dir().or_else(|| dirs::home_dir().map(|h| h.join(".config")))
}

/// Flat string-to-string config persisted as one JSON object.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<base>/aicommits/config.json`.
    pub fn locate(env: &Environment) -> Result<Self, ConfigError> {
        let base = config_base(env).ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::new(base.join(APP_DIR).join(CONFIG_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored JSON object as written, whatever its value types.
    ///
    /// Missing, unreadable or non-object files read as an empty object.
    fn read_object(&self) -> Map<String, Value> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("No readable config at {}: {}", self.path.display(), e);
                return Map::new();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                debug!("Config at {} is not a JSON object", self.path.display());
                Map::new()
            }
            Err(e) => {
                debug!("Ignoring corrupt config at {}: {}", self.path.display(), e);
                Map::new()
            }
        }
    }

    /// All stored string pairs. Non-string values are skipped.
    pub fn load(&self) -> BTreeMap<String, String> {
        self.read_object()
            .into_iter()
            .filter_map(|(k, v)| match v {
                Value::String(s) => Some((k, s)),
                other => {
                    debug!("Ignoring non-string config value for {}: {}", k, other);
                    None
                }
            })
            .collect()
    }

    /// Layer stored values under `env`. Variables already set in `env` win.
    pub fn overlay(&self, env: &Environment) -> Environment {
        env.clone().with_defaults(self.load())
    }

    /// Stored value for `key`. Non-string values come back as their JSON text.
    pub fn get(&self, key: &str) -> Option<String> {
        self.read_object().remove(key).map(|v| match v {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    /// Store `value` under `key`, keeping every other stored entry as is.
    pub fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let dir = self.path.parent().ok_or(ConfigError::NoConfigDir)?;
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
            path: dir.display().to_string(),
            source,
        })?;

        let mut data = self.read_object();
        data.insert(key.to_string(), Value::String(value.to_string()));

        let mut content = serde_json::to_string_pretty(&data).map_err(ConfigError::Serialize)?;
        content.push('\n');

        self.write_atomic(dir, &content)
    }

    /// Write through a temp file in the same directory, then rename over.
    fn write_atomic(&self, dir: &Path, content: &str) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: self.path.display().to_string(),
            source,
        };

        let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
        file.write_all(content.as_bytes()).map_err(write_err)?;
        file.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}
