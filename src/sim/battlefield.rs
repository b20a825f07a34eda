//! Per-round battlefield: terrain, colours and the two tanks

use std::ops::Range;

use serde::Serialize;

use super::tank::{Side, Tank};
use super::terrain::{TerrainProfile, UnitSource, generate};
use crate::config::Config;

/// Ground colours a round can be drawn in
pub const TERRAIN_COLORS: [&str; 11] = [
    "#27FF00", "#43AB08", "#9D5109", "#EABC00", "#00960E", "#CCCCCC", "#FFFFFF", "#F7CAA6",
    "#BAEFFF", "#8E4103", "#A50000",
];

/// Sky colours a round can be drawn in
pub const SKY_COLORS: [&str; 1] = ["#000000"];

/// Everything the external engine needs to draw and collide against
#[derive(Debug, Clone, Serialize)]
pub struct Battlefield {
    pub terrain: TerrainProfile,
    pub terrain_color: String,
    pub sky_color: String,
    pub left_tank: Tank,
    pub right_tank: Tank,
}

impl Battlefield {
    /// Generate terrain, pick colours and seat both tanks on flat pads
    pub fn generate<R: UnitSource + ?Sized>(config: &Config, rng: &mut R) -> Self {
        let mut terrain = generate(config, rng);
        let terrain_color = pick(&TERRAIN_COLORS, rng).to_string();
        let sky_color = pick(&SKY_COLORS, rng).to_string();

        for pos in [config.tank_left_pos(), config.tank_right_pos()] {
            terrain.flatten(pos as usize, config.tank_width() as usize);
        }
        let left_tank = Tank::new(
            Side::Left,
            config.tank_left_pos(),
            config.tank_width(),
            config.tank_height(),
            &terrain,
        );
        let right_tank = Tank::new(
            Side::Right,
            config.tank_right_pos(),
            config.tank_width(),
            config.tank_height(),
            &terrain,
        );

        Self {
            terrain,
            terrain_color,
            sky_color,
            left_tank,
            right_tank,
        }
    }

    pub fn tank(&self, side: Side) -> &Tank {
        match side {
            Side::Left => &self.left_tank,
            Side::Right => &self.right_tank,
        }
    }

    /// Dig a crater at column `x` and re-level the tank pads
    ///
    /// Returns the columns that need redrawing.
    pub fn apply_impact(&mut self, x: usize, radius: u32) -> Range<usize> {
        let mut touched = self.terrain.crater(x, radius);
        for tank in [&mut self.left_tank, &mut self.right_tank] {
            let pad = tank.column()..tank.column() + tank.footprint();
            if pad.start < touched.end && touched.start < pad.end {
                self.terrain.flatten(pad.start, pad.len());
                touched = touched.start.min(pad.start)..touched.end.max(pad.end);
            }
            tank.seat(&self.terrain);
        }
        log::debug!("Impact at column {} reshaped {:?}", x, touched);
        touched
    }
}

fn pick<'a, R: UnitSource + ?Sized>(choices: &[&'a str], rng: &mut R) -> &'a str {
    let index = (rng.next_unit() * choices.len() as f64) as usize;
    choices[index.min(choices.len() - 1)]
}
