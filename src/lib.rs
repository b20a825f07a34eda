//! Warbots - a turn-based artillery duel
//!
//! Core modules:
//! - `config`: Validated run parameters
//! - `sim`: Deterministic terrain, controls and turn state
//! - `input`: Key code to command mapping
//! - `engine`: Seams to the external render/physics engine
//! - `game_loop`: Cooperative per-frame driver

pub mod config;
pub mod engine;
pub mod game_loop;
pub mod input;
pub mod sim;

pub use config::{Config, ConfigError, ConfigFile};
pub use engine::{Engine, FixedRateFrames, FrameSource, ShotOutcome};
pub use game_loop::{FrameReport, GameLoop, InputQueue, StopHandle};
pub use input::{InputCommand, KeyBindings};
pub use sim::{ControlState, FireEvent, Session, TerrainProfile, fire, generate};

/// Loop and headless-engine constants
pub mod consts {
    /// Display refresh rate assumed by the headless driver
    pub const FRAME_RATE_HZ: f64 = 60.0;

    /// Scales elapsed milliseconds into shell travel time
    pub const PROJECTILE_SPEED_MODIFIER: f64 = 0.75;
    /// Divides control power into launch speed (pixels/ms)
    pub const POWER_NORMALIZER: f64 = 200.0;
    /// Downward acceleration applied to shells (pixels/ms²)
    pub const GRAVITY: f64 = 0.001;
}
