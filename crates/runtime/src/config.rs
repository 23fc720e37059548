//! Runtime configuration.
//!
//! Values come from three layers, later ones winning: built-in defaults,
//! an optional TOML file ([`RuntimeConfig::load`]), and `SIM_*` environment
//! variables ([`RuntimeConfig::apply_env`]).
use std::env;
use std::path::{Path, PathBuf};

use game_core::GameConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Settings for one simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Grid and perception tunables.
    ///
    /// Per-entity values are copied when a component is built: only entities
    /// created with [`Ai::from_config`](game_core::Ai::from_config) and
    /// [`Vision::from_config`](game_core::Vision::from_config) pick up the
    /// thresholds and vision set here. `Default` impls use the built-in
    /// defaults instead.
    pub game: GameConfig,
    /// Fixed delta handed to every system by [`crate::Simulation::step`].
    pub step_seconds: f32,
    /// How long an unaware entity waits before turning.
    pub idle_wait_seconds: f32,
    /// How long a searching entity looks in each direction.
    pub search_look_seconds: f32,
    /// Maximum tiles an entity may advance along its path per step.
    pub move_tiles_per_step: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            step_seconds: 0.25,
            idle_wait_seconds: 1.0,
            search_look_seconds: 0.5,
            move_tiles_per_step: 1,
        }
    }
}

impl RuntimeConfig {
    /// Reads a TOML file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults overridden by environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Applies environment overrides.
    ///
    /// Environment variables:
    /// - `SIM_TILE_SIZE` - Tile edge in pixels
    /// - `SIM_DETECTION_THRESHOLD` - Seconds of sight before engaging
    /// - `SIM_SEARCH_TIMEOUT` - Seconds of searching before giving up
    /// - `SIM_STEP_SECONDS` - Delta per simulation step
    ///
    /// Unparsable values are ignored.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = parse(&lookup, "SIM_TILE_SIZE") {
            self.game.tile_size = value;
        }
        if let Some(value) = parse(&lookup, "SIM_DETECTION_THRESHOLD") {
            self.game.detection_threshold = value;
        }
        if let Some(value) = parse(&lookup, "SIM_SEARCH_TIMEOUT") {
            self.game.search_timeout = value;
        }
        if let Some(value) = parse(&lookup, "SIM_STEP_SECONDS") {
            self.step_seconds = value;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.tile_size == 0 {
            return Err(invalid("game.tile_size", "must be at least one pixel"));
        }
        if self.game.max_sight_distance == 0 {
            return Err(invalid("game.max_sight_distance", "must be at least one tile"));
        }
        positive("game.detection_threshold", self.game.detection_threshold)?;
        positive("game.search_timeout", self.game.search_timeout)?;
        positive("game.vision_range", self.game.vision_range)?;
        if !(self.game.vision_angle > 0.0 && self.game.vision_angle <= 360.0) {
            return Err(invalid("game.vision_angle", "must be in (0, 360] degrees"));
        }
        positive("step_seconds", self.step_seconds)?;
        positive("idle_wait_seconds", self.idle_wait_seconds)?;
        positive("search_look_seconds", self.search_look_seconds)?;
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key)?.trim().parse().ok()
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a positive number of seconds or pixels"))
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
