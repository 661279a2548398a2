/// Game settings, read once at startup from an optional TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{GameError, Result};

/// Settings file looked up in the working directory.
pub const CONFIG_PATH: &str = "topdown_shooter.toml";

/// Level loaded when the settings file does not name one.
pub const DEFAULT_LEVEL_PATH: &str = "assets/levels/1.txt";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub level_path: PathBuf,
    /// Size of one level tile in world units.
    pub tile_width: u32,
    pub tile_height: u32,
    /// World units covered by one terminal cell.
    pub cell_width: f32,
    pub cell_height: f32,
    /// Frame budget; faster frames sleep for the remainder.
    pub frame_millis: u64,
    pub spawn_interval_millis: u64,
    /// Frames a key stays held without a fresh press/repeat event.
    pub hold_window_frames: u64,
    pub player_speed: f32,
    pub enemy_speed: f32,
    pub bullet_speed: f32,
    /// Seconds an enemy waits between shots.
    pub shot_cooldown: f32,
    pub player_start: [f32; 2],
    pub log_file: PathBuf,
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            level_path: PathBuf::from(DEFAULT_LEVEL_PATH),
            tile_width: 32,
            tile_height: 32,
            cell_width: 8.0,
            cell_height: 16.0,
            frame_millis: 16,
            spawn_interval_millis: 1000,
            hold_window_frames: 8,
            player_speed: 300.0,
            enemy_speed: 90.0,
            bullet_speed: 600.0,
            shot_cooldown: 3.0,
            player_start: [550.0, 250.0],
            log_file: PathBuf::from("topdown_shooter.log"),
            log_filter: "topdown_shooter=info".to_string(),
        }
    }
}

impl GameConfig {
    /// Read settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes the world and screen mappings cannot work with.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("tile_width", self.tile_width), ("tile_height", self.tile_height)] {
            if value == 0 || i32::try_from(value).is_err() {
                return Err(GameError::InvalidSetting {
                    field,
                    reason: format!("{} is outside 1..={}", value, i32::MAX),
                });
            }
        }
        for (field, value) in [("cell_width", self.cell_width), ("cell_height", self.cell_height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::InvalidSetting {
                    field,
                    reason: format!("{} is not a positive size", value),
                });
            }
        }
        Ok(())
    }
}
