//! Run configuration
//!
//! Created once at startup and shared read-only for the lifetime of the
//! process. Every constructor validates, so holding a `Config` means it is
//! usable.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a configuration is rejected at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: u32, height: u32 },
    #[error("{name} bounds are inverted: min {min} > max {max}")]
    InvertedBounds {
        name: &'static str,
        min: i32,
        max: i32,
    },
    #[error("{side} tank at column {pos} (width {width}) does not fit a board {board_width} wide")]
    TankOutOfBounds {
        side: &'static str,
        pos: u32,
        width: u32,
        board_width: u32,
    },
    #[error("{0} must be positive")]
    InvalidTuning(&'static str),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Unvalidated run parameters, as written in a config file
///
/// Only becomes usable through `Config::try_from`, which validates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Board (rendering surface) width in columns
    pub board_width: u32,
    /// Board height; terrain samples lie in `[0, board_height]`
    pub board_height: u32,
    pub min_angle: i32,
    pub max_angle: i32,
    pub min_power: i32,
    pub max_power: i32,
    /// Left column of the left tank
    pub tank_left_pos: u32,
    /// Left column of the right tank
    pub tank_right_pos: u32,
    pub tank_width: u32,
    pub tank_height: u32,
    /// Half-width of the bowl an impact digs, in columns
    pub crater_radius: u32,
    /// Power change per up/down key press
    pub power_step: i32,
    /// Angle change per left/right key press
    pub angle_step: i32,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            board_width: 900,
            board_height: 500,
            min_angle: 0,
            max_angle: 180,
            min_power: 0,
            max_power: 1000,
            tank_left_pos: 100,
            tank_right_pos: 790,
            tank_width: 10,
            tank_height: 10,
            crater_radius: 30,
            power_step: 10,
            angle_step: 1,
        }
    }
}

impl ConfigFile {
    /// Check every invariant the rest of the crate relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width == 0 || self.board_height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.board_width,
                height: self.board_height,
            });
        }
        if self.min_angle > self.max_angle {
            return Err(ConfigError::InvertedBounds {
                name: "angle",
                min: self.min_angle,
                max: self.max_angle,
            });
        }
        if self.min_power > self.max_power {
            return Err(ConfigError::InvertedBounds {
                name: "power",
                min: self.min_power,
                max: self.max_power,
            });
        }
        if self.tank_width == 0 {
            return Err(ConfigError::InvalidTuning("tank_width"));
        }
        if self.crater_radius == 0 {
            return Err(ConfigError::InvalidTuning("crater_radius"));
        }
        if self.power_step <= 0 {
            return Err(ConfigError::InvalidTuning("power_step"));
        }
        if self.angle_step <= 0 {
            return Err(ConfigError::InvalidTuning("angle_step"));
        }
        for (side, pos) in [("left", self.tank_left_pos), ("right", self.tank_right_pos)] {
            if pos.saturating_add(self.tank_width) > self.board_width {
                return Err(ConfigError::TankOutOfBounds {
                    side,
                    pos,
                    width: self.tank_width,
                    board_width: self.board_width,
                });
            }
        }
        Ok(())
    }
}

/// Validated, immutable run parameters
///
/// Fields are read-only; every way of building one runs validation, so
/// holding a `Config` means the bounds are ordered and the tanks fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfigFile", into = "ConfigFile")]
pub struct Config {
    fields: ConfigFile,
}

impl TryFrom<ConfigFile> for Config {
    type Error = ConfigError;

    fn try_from(fields: ConfigFile) -> Result<Self, ConfigError> {
        fields.validate()?;
        Ok(Self { fields })
    }
}

impl From<Config> for ConfigFile {
    fn from(config: Config) -> Self {
        config.fields
    }
}

impl Default for Config {
    fn default() -> Self {
        // The stock layout always validates
        Self {
            fields: ConfigFile::default(),
        }
    }
}

impl Config {
    /// Build a config from board size and firing bounds, keeping the default
    /// tank layout squeezed into the board where needed.
    pub fn new(
        board_width: u32,
        board_height: u32,
        (min_angle, max_angle): (i32, i32),
        (min_power, max_power): (i32, i32),
    ) -> Result<Self, ConfigError> {
        let defaults = ConfigFile::default();
        let tank_width = defaults.tank_width.min(board_width);
        let right_edge = board_width.saturating_sub(tank_width);
        Self::try_from(ConfigFile {
            board_width,
            board_height,
            min_angle,
            max_angle,
            min_power,
            max_power,
            tank_left_pos: defaults.tank_left_pos.min(right_edge),
            tank_right_pos: defaults.tank_right_pos.min(right_edge),
            tank_width,
            ..defaults
        })
    }

    /// Parse a JSON config; absent fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let fields: ConfigFile = serde_json::from_str(json)?;
        Self::try_from(fields)
    }

    /// Read and parse a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded config from {} ({}x{})",
            path.display(),
            config.board_width(),
            config.board_height()
        );
        Ok(config)
    }

    pub fn board_width(&self) -> u32 {
        self.fields.board_width
    }

    pub fn board_height(&self) -> u32 {
        self.fields.board_height
    }

    pub fn min_angle(&self) -> i32 {
        self.fields.min_angle
    }

    pub fn max_angle(&self) -> i32 {
        self.fields.max_angle
    }

    pub fn min_power(&self) -> i32 {
        self.fields.min_power
    }

    pub fn max_power(&self) -> i32 {
        self.fields.max_power
    }

    pub fn tank_left_pos(&self) -> u32 {
        self.fields.tank_left_pos
    }

    pub fn tank_right_pos(&self) -> u32 {
        self.fields.tank_right_pos
    }

    pub fn tank_width(&self) -> u32 {
        self.fields.tank_width
    }

    pub fn tank_height(&self) -> u32 {
        self.fields.tank_height
    }

    pub fn crater_radius(&self) -> u32 {
        self.fields.crater_radius
    }

    pub fn power_step(&self) -> i32 {
        self.fields.power_step
    }

    pub fn angle_step(&self) -> i32 {
        self.fields.angle_step
    }

    /// Midpoint of the power range
    pub fn initial_power(&self) -> i32 {
        midpoint(self.fields.min_power, self.fields.max_power)
    }

    /// Midpoint of the angle range
    pub fn initial_angle(&self) -> i32 {
        midpoint(self.fields.min_angle, self.fields.max_angle)
    }
}

fn midpoint(min: i32, max: i32) -> i32 {
    // i64 keeps extreme bounds from overflowing
    ((min as i64 + max as i64) / 2) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(ConfigFile::from(config.clone()).validate().is_ok());
        assert_eq!(config.initial_power(), 500);
        assert_eq!(config.initial_angle(), 90);
    }

    #[test]
    fn test_small_board() {
        let config = Config::new(5, 5, (0, 180), (0, 100)).unwrap();
        assert_eq!(config.board_width(), 5);
        assert!(config.tank_right_pos() + config.tank_width() <= 5);
    }

    #[test]
    fn test_rejects_empty_board() {
        assert!(matches!(
            Config::new(0, 5, (0, 180), (0, 100)),
            Err(ConfigError::EmptyBoard { .. })
        ));
        assert!(matches!(
            Config::new(5, 0, (0, 180), (0, 100)),
            Err(ConfigError::EmptyBoard { .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let err = Config::new(10, 10, (90, 0), (0, 100)).unwrap_err();
        assert!(matches!(err, ConfigError::InvertedBounds { name: "angle", .. }));
        let err = Config::new(10, 10, (0, 90), (100, 0)).unwrap_err();
        assert!(matches!(err, ConfigError::InvertedBounds { name: "power", .. }));
    }

    #[test]
    fn test_degenerate_bounds_allowed() {
        let config = Config::new(10, 10, (45, 45), (7, 7)).unwrap();
        assert_eq!(config.initial_angle(), 45);
        assert_eq!(config.initial_power(), 7);
    }

    #[test]
    fn test_from_json_partial() {
        let config = Config::from_json(r#"{ "board_width": 400, "tank_right_pos": 300 }"#).unwrap();
        assert_eq!(config.board_width(), 400);
        assert_eq!(config.board_height(), 500);
        assert_eq!(config.max_power(), 1000);
    }

    #[test]
    fn test_from_json_rejects_tank_off_board() {
        // Default right tank sits at 790, past a 400-wide board
        let err = Config::from_json(r#"{ "board_width": 400 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::TankOutOfBounds { side: "right", .. }));
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(Config::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_error_message_names_problem() {
        let err = Config::new(10, 10, (0, 90), (100, 0)).unwrap_err();
        assert_eq!(err.to_string(), "power bounds are inverted: min 100 > max 0");
    }

    #[test]
    fn test_deserialize_runs_validation() {
        // Bypassing from_json still cannot produce inverted bounds
        let result = serde_json::from_str::<Config>(r#"{ "min_power": 100, "max_power": 0 }"#);
        assert!(result.is_err());

        let file = ConfigFile {
            min_power: 100,
            max_power: 0,
            ..Default::default()
        };
        assert!(matches!(
            Config::try_from(file),
            Err(ConfigError::InvertedBounds { name: "power", .. })
        ));
    }

    #[test]
    fn test_serialize_round_trips_through_validation() {
        let config = Config::new(64, 48, (10, 170), (5, 95)).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(Config::from_json(&json).unwrap(), config);
    }
}
