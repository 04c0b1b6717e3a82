//! Configuration sections with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strata_path::PathfinderConfig;
use strata_voxel::WorldGenParams;

use crate::error::ConfigError;

/// File name of the persisted config inside the config directory.
pub const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration. Each section falls back to its defaults when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// World extent, chunk size, and terrain height. Read once at generation.
    pub world: WorldGenParams,
    /// Snap ceiling, waypoint offset, and step cost model.
    pub pathfinding: PathfinderConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Default tracing filter directive; `RUST_LOG` takes precedence.
    pub log_level: String,
    /// Also write JSON logs to a file in debug builds.
    pub log_to_file: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: true,
        }
    }
}

/// Platform config directory for strata (e.g. `~/.config/strata`).
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("strata"))
}

// --- Load / Save / Reload ---

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ron::from_str(&contents)?)
}

impl Config {
    /// Loads `config.ron` from `config_dir`. A missing file is created with
    /// the defaults.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("wrote default config to {}", path.display());
            return Ok(config);
        }
        let config = read_config(&path)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Writes this config as pretty RON, creating `config_dir` if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_err)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);
        let text = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(&path, text).map_err(write_err)
    }

    /// Re-reads the file. Returns `Some` only if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = read_config(&config_dir.join(CONFIG_FILE))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("config changed on disk");
        Ok(Some(fresh))
    }

    /// Rejects settings the world or pathfinder cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let world = &self.world;
        if world.chunk_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "world.chunk_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if world.ground_height > world.chunk_size {
            return Err(ConfigError::InvalidValue {
                field: "world.ground_height",
                reason: format!(
                    "{} exceeds chunk_size {}",
                    world.ground_height, world.chunk_size
                ),
            });
        }
        if self.pathfinding.snap_max_height < 0 {
            return Err(ConfigError::InvalidValue {
                field: "pathfinding.snap_max_height",
                reason: "must not be negative".to_string(),
            });
        }
        if self.pathfinding.max_step_height < 1 {
            return Err(ConfigError::InvalidValue {
                field: "pathfinding.max_step_height",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
