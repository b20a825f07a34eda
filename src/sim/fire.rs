//! Turning the trigger into a fire event

use serde::{Deserialize, Serialize};

use super::control::ControlState;
use super::tank::Tank;
use crate::engine::Engine;

/// Snapshot of the controls at the moment the trigger was pulled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireEvent {
    pub power: i32,
    pub angle: i32,
}

impl FireEvent {
    /// Launch angle in radians
    pub fn angle_radians(&self) -> f64 {
        (self.angle as f64).to_radians()
    }
}

/// Capture the current settings
pub fn fire(control: &ControlState) -> FireEvent {
    FireEvent {
        power: control.power(),
        angle: control.angle(),
    }
}

/// Capture the current settings and hand them to the engine's fire intake
pub fn dispatch<E: Engine + ?Sized>(control: &ControlState, from: &Tank, engine: &mut E) -> FireEvent {
    let event = fire(control);
    log::info!(
        "{} tank fires: power {} angle {}",
        from.side.as_str(),
        event.power,
        event.angle
    );
    engine.fire(event, from);
    event
}
