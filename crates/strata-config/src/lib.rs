//! Configuration for the strata simulation.
//!
//! Settings persist to disk as a RON file, every section tolerates missing
//! fields, and command-line arguments override loaded values.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE, Config, DebugConfig, default_config_dir};
pub use error::ConfigError;
