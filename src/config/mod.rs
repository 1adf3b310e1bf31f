//! Persistent config, environment overlay and the `config` subcommand.

pub mod command;
pub mod env;
pub mod store;

pub use command::{ConfigAction, run_config};
pub use env::Environment;
pub use store::{CONFIG_HOME_VAR, ConfigStore, config_base};
