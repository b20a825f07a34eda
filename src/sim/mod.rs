//! Deterministic game core
//!
//! Everything here is pure and deterministic:
//! - Randomness only through an injected source
//! - No rendering, physics or platform dependencies
//! - Controls change only through bounded increments

pub mod battlefield;
pub mod control;
pub mod fire;
pub mod session;
pub mod tank;
pub mod terrain;
pub mod turn;

pub use battlefield::{Battlefield, SKY_COLORS, TERRAIN_COLORS};
pub use control::ControlState;
pub use fire::{FireEvent, dispatch, fire};
pub use session::Session;
pub use tank::{MUZZLE_CLEARANCE, Side, Tank};
pub use terrain::{STEP_CHANGE, STEP_MAX, TerrainProfile, TerrainWalk, UnitSource, WalkStep, generate};
pub use turn::{Turn, TurnPhase};
