//! Turn state machine
//!
//! A turn starts in `Aiming` with fresh controls for the active side. The
//! trigger moves it to `InFlight`; the engine reporting the end of the shot
//! hands the turn to the other side.

use serde::{Deserialize, Serialize};

use super::control::ControlState;
use super::fire::{FireEvent, dispatch};
use super::battlefield::Battlefield;
use super::tank::Side;
use crate::config::Config;
use crate::engine::Engine;

/// Phase of the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Active player is adjusting power and angle
    Aiming,
    /// A shell is in the air; controls and trigger are locked
    InFlight,
}

#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    active: Side,
    phase: TurnPhase,
    control: ControlState,
    /// Shots fired since the round started
    shots: u32,
}

impl Turn {
    /// First turn of a round; the left player opens
    pub fn new(config: &Config) -> Self {
        Self {
            active: Side::Left,
            phase: TurnPhase::Aiming,
            control: ControlState::new(config),
            shots: 0,
        }
    }

    pub fn active(&self) -> Side {
        self.active
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn control(&self) -> &ControlState {
        &self.control
    }

    pub fn shots(&self) -> u32 {
        self.shots
    }

    pub fn adjust_power(&mut self, delta: i32) {
        if self.phase == TurnPhase::Aiming {
            self.control.increment_power(delta);
        }
    }

    pub fn adjust_angle(&mut self, delta: i32) {
        if self.phase == TurnPhase::Aiming {
            self.control.increment_angle(delta);
        }
    }

    /// Pull the trigger for the active side, firing from its own tank
    ///
    /// Returns `None` without touching the engine if a shot is already in
    /// flight.
    pub fn take<E: Engine + ?Sized>(
        &mut self,
        battlefield: &Battlefield,
        engine: &mut E,
    ) -> Option<FireEvent> {
        if self.phase == TurnPhase::InFlight {
            log::warn!("{} player fired while a shot is in flight", self.active.as_str());
            return None;
        }
        let event = dispatch(&self.control, battlefield.tank(self.active), engine);
        self.phase = TurnPhase::InFlight;
        self.shots += 1;
        Some(event)
    }

    /// Hand over to the other side with fresh controls
    pub fn end(&mut self, config: &Config) {
        self.active = self.active.opponent();
        self.phase = TurnPhase::Aiming;
        self.control = ControlState::new(config);
        log::info!("Turn passes to {} player", self.active.as_str());
    }
}
