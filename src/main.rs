//! Warbots headless driver
//!
//! Runs a seeded duel between two scripted players against a simple
//! ballistic stand-in for the real engine, logging each turn.
//!
//! Usage: `warbots [CONFIG.json] [SEED]`

use std::ops::Range;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use warbots::consts::*;
use warbots::sim::{Battlefield, Side, Tank, TerrainProfile, TurnPhase};
use warbots::{
    Config, Engine, FireEvent, FixedRateFrames, FrameSource, GameLoop, KeyBindings, Session,
    ShotOutcome,
};

/// Shots fired before the demo ends
const DEMO_SHOTS: u32 = 6;
/// Frames after which a stalled demo gives up
const DEMO_FRAME_LIMIT: u64 = 60 * 60;

struct Shell {
    origin: DVec2,
    velocity: DVec2,
    fired_at: Option<f64>,
}

/// Point-mass shells under constant gravity, colliding with the terrain only
#[derive(Default)]
struct BallisticEngine {
    terrain: Option<TerrainProfile>,
    shell: Option<Shell>,
}

impl BallisticEngine {
    fn position(shell: &Shell, elapsed_ms: f64) -> DVec2 {
        let t = PROJECTILE_SPEED_MODIFIER * elapsed_ms;
        DVec2::new(
            shell.origin.x + shell.velocity.x * t,
            shell.origin.y - shell.velocity.y * t + 0.5 * GRAVITY * t * t,
        )
    }
}

impl Engine for BallisticEngine {
    fn start(&mut self, battlefield: &Battlefield) {
        self.terrain = Some(battlefield.terrain.clone());
        self.shell = None;
    }

    fn fire(&mut self, event: FireEvent, from: &Tank) {
        let speed = event.power as f64 / POWER_NORMALIZER;
        let angle = event.angle_radians();
        // Angle 0 points left, 180 points right
        self.shell = Some(Shell {
            origin: from.muzzle(),
            velocity: DVec2::new(-speed * angle.cos(), speed * angle.sin()),
            fired_at: None,
        });
    }

    fn step(&mut self, timestamp: f64) -> Option<ShotOutcome> {
        let terrain = self.terrain.as_ref()?;
        let shell = self.shell.as_mut()?;
        let fired_at = *shell.fired_at.get_or_insert(timestamp);
        let pos = Self::position(shell, timestamp - fired_at);

        let outcome = if pos.y > terrain.board_height() || pos.x <= 0.0 || pos.x >= terrain.len() as f64 {
            ShotOutcome::OutOfBounds
        } else if terrain.height_at(pos.x as usize).is_some_and(|surface| surface <= pos.y) {
            ShotOutcome::Impact { x: pos.x }
        } else {
            return None;
        };
        self.shell = None;
        Some(outcome)
    }

    fn reshape(&mut self, battlefield: &Battlefield, columns: Range<usize>) {
        log::debug!("Redrawing columns {:?}", columns);
        self.terrain = Some(battlefield.terrain.clone());
    }
}

/// Key presses a scripted player makes before firing
fn scripted_aim(side: Side, keys: &KeyBindings, rng: &mut Pcg32) -> Vec<u32> {
    let toward_opponent = match side {
        Side::Left => keys.angle_up,
        Side::Right => keys.angle_down,
    };
    let mut presses = Vec::new();
    presses.extend(std::iter::repeat_n(toward_opponent, rng.random_range(30..=60)));
    presses.extend(std::iter::repeat_n(keys.power_down, rng.random_range(30..=40)));
    presses.push(keys.fire);
    presses
}

fn parse_args() -> Result<(Config, u64), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let seed = match args.next() {
        Some(seed) => seed.parse()?,
        None => 0x5EED,
    };
    Ok((config, seed))
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Warbots (headless) starting...");

    let (config, seed) = match parse_args() {
        Ok(parsed) => parsed,
        Err(e) => {
            log::error!("Invalid startup configuration: {}", e);
            std::process::exit(1);
        }
    };

    let keys = KeyBindings::default();
    let mut players = Pcg32::seed_from_u64(seed.wrapping_add(1));
    let mut session = Session::new(config, seed);
    let mut engine = BallisticEngine::default();
    let mut game_loop = GameLoop::new();
    let stop = game_loop.stop_handle();
    let input = game_loop.input_queue();
    let mut frames = FixedRateFrames::new(FRAME_RATE_HZ).with_limit(DEMO_FRAME_LIMIT);

    session.start(&mut engine);

    let mut aimed = false;
    while !stop.is_stopped() {
        let Some(timestamp) = frames.next_frame() else {
            log::warn!("Demo frame limit reached");
            break;
        };

        // Scripted players stand in for keyup handlers
        if session.turn().phase() == TurnPhase::Aiming && !aimed {
            for key in scripted_aim(session.turn().active(), &keys, &mut players) {
                if let Some(command) = keys.command_for(key, session.config()) {
                    input.push(command);
                }
            }
            aimed = true;
        }

        let report = game_loop.frame(&mut session, &mut engine, timestamp);
        if report.outcome.is_some() {
            aimed = false;
            if session.turn().shots() >= DEMO_SHOTS {
                stop.stop();
            }
        }
    }

    let field = session.battlefield();
    log::info!(
        "Finished after {} frames; tanks at y={:.1} (left) and y={:.1} (right)",
        game_loop.frames(),
        field.left_tank.location.y,
        field.right_tank.location.y
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives the library directly
}
