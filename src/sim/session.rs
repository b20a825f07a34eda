//! A running duel: config, seeded RNG, battlefield and the current turn

use std::ops::Range;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::battlefield::Battlefield;
use super::fire::FireEvent;
use super::turn::{Turn, TurnPhase};
use crate::config::Config;
use crate::engine::{Engine, ShotOutcome};
use crate::input::InputCommand;

pub struct Session {
    config: Config,
    /// Run seed for reproducibility
    seed: u64,
    rng: Pcg32,
    /// Rounds started so far (1-based once the first round is generated)
    round: u32,
    battlefield: Battlefield,
    turn: Turn,
}

impl Session {
    /// Generate the first round; call [`Session::start`] to hand it to the engine
    pub fn new(config: Config, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let battlefield = Battlefield::generate(&config, &mut rng);
        let turn = Turn::new(&config);
        log::info!("Session created with seed: {}", seed);
        Self {
            config,
            seed,
            rng,
            round: 1,
            battlefield,
            turn,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn battlefield(&self) -> &Battlefield {
        &self.battlefield
    }

    pub fn turn(&self) -> &Turn {
        &self.turn
    }

    /// Hand the current battlefield to the engine
    pub fn start<E: Engine + ?Sized>(&self, engine: &mut E) {
        log::info!(
            "Round {} starting ({} terrain, {} columns)",
            self.round,
            self.battlefield.terrain_color,
            self.battlefield.terrain.len()
        );
        engine.start(&self.battlefield);
    }

    /// Fresh terrain and a fresh turn, left player first
    pub fn new_round<E: Engine + ?Sized>(&mut self, engine: &mut E) {
        self.round += 1;
        self.battlefield = Battlefield::generate(&self.config, &mut self.rng);
        self.turn = Turn::new(&self.config);
        self.start(engine);
    }

    /// Apply one player command; returns the event if it fired a shot
    pub fn apply<E: Engine + ?Sized>(&mut self, command: InputCommand, engine: &mut E) -> Option<FireEvent> {
        log::debug!("{} player: {:?}", self.turn.active().as_str(), command);
        match command {
            InputCommand::AdjustPower(delta) => {
                self.turn.adjust_power(delta);
                None
            }
            InputCommand::AdjustAngle(delta) => {
                self.turn.adjust_angle(delta);
                None
            }
            InputCommand::Fire => self.turn.take(&self.battlefield, engine),
        }
    }

    /// Settle the shot in flight and pass the turn
    ///
    /// Returns the terrain columns reshaped by an impact. Outcomes reported
    /// while no shot is in flight are dropped without touching the turn.
    pub fn resolve(&mut self, outcome: ShotOutcome) -> Option<Range<usize>> {
        if self.turn.phase() != TurnPhase::InFlight {
            log::warn!("Dropping {:?}: no shot in flight", outcome);
            return None;
        }
        let touched = match outcome {
            ShotOutcome::Impact { x } if x >= 0.0 && x < self.battlefield.terrain.len() as f64 => {
                log::info!("Impact at column {:.0}", x);
                Some(
                    self.battlefield
                        .apply_impact(x as usize, self.config.crater_radius()),
                )
            }
            ShotOutcome::Impact { x } => {
                log::warn!("Impact reported off the board at {:.1}", x);
                None
            }
            ShotOutcome::OutOfBounds => {
                log::info!("Shot left the board");
                None
            }
        };
        self.turn.end(&self.config);
        touched
    }
}
