//! Tanks and the side that owns them

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::terrain::TerrainProfile;

/// Gap between the top of a tank and its muzzle
pub const MUZZLE_CLEARANCE: f64 = 5.0;

/// Which player a tank belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Human player, fires first
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// A tank sitting on the terrain
///
/// `location` is the bottom-left corner in board coordinates (y grows
/// downward, matching terrain samples).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tank {
    pub side: Side,
    pub location: DVec2,
    pub width: f64,
    pub height: f64,
}

impl Tank {
    /// Place a tank at column `column`, resting on `terrain`
    pub fn new(side: Side, column: u32, width: u32, height: u32, terrain: &TerrainProfile) -> Self {
        let mut tank = Self {
            side,
            location: DVec2::new(column as f64, 0.0),
            width: width as f64,
            height: height as f64,
        };
        tank.seat(terrain);
        tank
    }

    /// Left column of the footprint
    pub fn column(&self) -> usize {
        self.location.x as usize
    }

    /// Footprint width in columns
    pub fn footprint(&self) -> usize {
        self.width as usize
    }

    /// Drop (or lift) the tank onto the current surface under its left column
    pub fn seat(&mut self, terrain: &TerrainProfile) {
        if let Some(surface) = terrain.height_at(self.column()) {
            self.location.y = surface;
        }
    }

    /// Point a shell leaves the barrel
    pub fn muzzle(&self) -> DVec2 {
        DVec2::new(
            self.location.x + self.width / 2.0,
            self.location.y - self.height - MUZZLE_CLEARANCE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_alternates() {
        assert_eq!(Side::Left.opponent(), Side::Right);
        assert_eq!(Side::Left.opponent().opponent(), Side::Left);
    }

    #[test]
    fn test_tank_rests_on_surface() {
        let terrain = TerrainProfile::from_heights(vec![40.0, 42.0, 44.0, 46.0], 100);
        let tank = Tank::new(Side::Right, 2, 2, 10, &terrain);
        assert_eq!(tank.location, DVec2::new(2.0, 44.0));
        assert_eq!(tank.muzzle(), DVec2::new(3.0, 29.0));
    }

    #[test]
    fn test_reseat_after_terrain_change() {
        let mut terrain = TerrainProfile::from_heights(vec![40.0; 8], 100);
        let mut tank = Tank::new(Side::Left, 3, 2, 10, &terrain);
        terrain.crater(3, 2);
        tank.seat(&terrain);
        assert_eq!(tank.location.y, 42.0);
    }
}
