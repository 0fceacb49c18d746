//! Game configuration.
//!
//! Every value has a default matching the classic board, so a config file
//! only needs the keys it wants to change:
//!
//! ```toml
//! [physics]
//! gravity = 2
//!
//! [audio]
//! volume = 0.5
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot serialize config")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board: BoardConfig,
    pub bird: BirdConfig,
    pub pipes: PipeConfig,
    pub physics: PhysicsConfig,
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BirdConfig {
    /// Fixed horizontal position.
    pub x: i32,
    /// Starting height, also used on restart.
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Velocity set by a jump. Negative is upwards.
    pub jump_velocity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeConfig {
    pub width: i32,
    pub height: i32,
    /// Vertical opening between the top and bottom pipe of a pair.
    pub gap: i32,
    /// Horizontal movement per tick. Must be negative.
    pub scroll_velocity: i32,
    pub spawn_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to the bird's velocity every tick.
    pub gravity: i32,
    pub tick_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub volume: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 360,
            height: 640,
        }
    }
}

impl Default for BirdConfig {
    fn default() -> Self {
        let board = BoardConfig::default();
        Self {
            x: board.width / 8,
            y: board.height / 2,
            width: 34,
            height: 24,
            jump_velocity: -9,
        }
    }
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 512,
            gap: BoardConfig::default().height / 4,
            scroll_velocity: -4,
            spawn_interval_ms: 1500,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1,
            tick_ms: 1000 / 60,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 0.8,
        }
    }
}

impl Config {
    /// Load `path` if given, otherwise use the defaults. The result is
    /// validated either way.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("board.width", self.board.width),
            ("board.height", self.board.height),
            ("bird.width", self.bird.width),
            ("bird.height", self.bird.height),
            ("pipes.width", self.pipes.width),
            ("pipes.height", self.pipes.height),
            ("pipes.gap", self.pipes.gap),
        ];
        for (key, value) in positive {
            if value <= 0 {
                return Err(invalid(format!("{key} must be positive, got {value}")));
            }
        }
        if self.physics.tick_ms == 0 {
            return Err(invalid("physics.tick_ms must be at least 1"));
        }
        if self.pipes.spawn_interval_ms == 0 {
            return Err(invalid("pipes.spawn_interval_ms must be at least 1"));
        }
        if self.pipes.scroll_velocity >= 0 {
            return Err(invalid(format!(
                "pipes.scroll_velocity must be negative, got {}",
                self.pipes.scroll_velocity
            )));
        }
        if self.physics.gravity < 0 {
            return Err(invalid(format!(
                "physics.gravity must not be negative, got {}",
                self.physics.gravity
            )));
        }
        if !(0..self.board.width).contains(&self.bird.x) {
            return Err(invalid(format!(
                "bird.x must lie on the board (0..{}), got {}",
                self.board.width, self.bird.x
            )));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(invalid(format!(
                "audio.volume must be between 0.0 and 1.0, got {}",
                self.audio.volume
            )));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}
