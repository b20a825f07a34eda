//! Procedural terrain
//!
//! The battlefield silhouette is a bounded random walk over the board
//! columns. Samples are surface rows measured down from the top edge of the
//! board, the way the renderer draws them, so a larger sample is lower ground.

use std::ops::Range;

use rand::Rng;
use serde::Serialize;

use crate::config::Config;

/// Maximum slope magnitude of the walk
pub const STEP_MAX: f64 = 2.5;
/// Maximum per-column slope perturbation
pub const STEP_CHANGE: f64 = 1.0;

/// Source of uniform samples in `[0, 1)`
///
/// Every `rand::Rng` is one; tests substitute scripted sequences.
pub trait UnitSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng> UnitSource for R {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// One column of the walk, after clamping and reflection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkStep {
    pub height: f64,
    pub slope: f64,
}

/// Iterator over the walk, one step per board column
pub struct TerrainWalk<'r, R: UnitSource + ?Sized> {
    rng: &'r mut R,
    ceiling: f64,
    height: f64,
    slope: f64,
    remaining: usize,
}

impl<'r, R: UnitSource + ?Sized> TerrainWalk<'r, R> {
    /// Start a walk; draws the starting height and slope immediately
    pub fn new(config: &Config, rng: &'r mut R) -> Self {
        let ceiling = config.board_height() as f64;
        let height = rng.next_unit() * ceiling;
        let slope = (rng.next_unit() * STEP_MAX) * 2.0 - STEP_MAX;
        Self {
            rng,
            ceiling,
            height,
            slope,
            remaining: config.board_width() as usize,
        }
    }
}

impl<R: UnitSource + ?Sized> Iterator for TerrainWalk<'_, R> {
    type Item = WalkStep;

    fn next(&mut self) -> Option<WalkStep> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        self.height += self.slope;
        self.slope += (self.rng.next_unit() * STEP_CHANGE) * 2.0 - STEP_CHANGE;
        self.slope = self.slope.clamp(-STEP_MAX, STEP_MAX);

        // Reflect off the ceiling and floor
        if self.height > self.ceiling {
            self.height = self.ceiling;
            self.slope = -self.slope;
        }
        if self.height < 0.0 {
            self.height = 0.0;
            self.slope = -self.slope;
        }

        Some(WalkStep {
            height: self.height,
            slope: self.slope,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: UnitSource + ?Sized> ExactSizeIterator for TerrainWalk<'_, R> {}

/// Per-column surface samples, one per board column
///
/// Serialized for hosts; only built through `generate` or `from_heights`,
/// which keep every sample inside `[0, board_height]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerrainProfile {
    heights: Vec<f64>,
    ceiling: f64,
}

impl TerrainProfile {
    /// Wrap existing samples, clamping each into `[0, board_height]`
    pub fn from_heights(heights: Vec<f64>, board_height: u32) -> Self {
        let ceiling = board_height as f64;
        let heights = heights.into_iter().map(|h| h.clamp(0.0, ceiling)).collect();
        Self { heights, ceiling }
    }

    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Upper bound of every sample
    pub fn board_height(&self) -> f64 {
        self.ceiling
    }

    /// Sample at column `x`, `None` off the board
    pub fn height_at(&self, x: usize) -> Option<f64> {
        self.heights.get(x).copied()
    }

    /// Level `width` columns from `start` to the sample at `start`
    pub fn flatten(&mut self, start: usize, width: usize) {
        let Some(level) = self.height_at(start) else {
            return;
        };
        let end = start.saturating_add(width).min(self.heights.len());
        self.heights[start..end].fill(level);
    }

    /// Dig a bowl centred on column `center`, returning the columns touched
    ///
    /// Depth at distance `dx` is `sqrt(r² - dx²)`; samples never drop below
    /// the bottom of the board.
    pub fn crater(&mut self, center: usize, radius: u32) -> Range<usize> {
        if center >= self.heights.len() {
            return center..center;
        }
        let r = radius as usize;
        let start = center.saturating_sub(r);
        let end = center.saturating_add(r + 1).min(self.heights.len());
        let r2 = (radius as f64).powi(2);
        for (x, sample) in self.heights[start..end].iter_mut().enumerate() {
            let dx = (start + x) as f64 - center as f64;
            let depth = (r2 - dx * dx).max(0.0).sqrt();
            *sample = (*sample + depth).min(self.ceiling);
        }
        start..end
    }
}

/// Generate a fresh profile for the board described by `config`
pub fn generate<R: UnitSource + ?Sized>(config: &Config, rng: &mut R) -> TerrainProfile {
    let heights = TerrainWalk::new(config, rng).map(|step| step.height).collect();
    TerrainProfile {
        heights,
        ceiling: config.board_height() as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Replays fixed samples, then 0.5 (no slope change) once exhausted
    struct ScriptedSource {
        values: Vec<f64>,
        next: usize,
    }

    impl ScriptedSource {
        fn new(values: &[f64]) -> Self {
            Self {
                values: values.to_vec(),
                next: 0,
            }
        }
    }

    impl UnitSource for ScriptedSource {
        fn next_unit(&mut self) -> f64 {
            let value = self.values.get(self.next).copied().unwrap_or(0.5);
            self.next += 1;
            value
        }
    }

    fn board(width: u32, height: u32) -> Config {
        Config::new(width, height, (0, 180), (0, 100)).unwrap()
    }

    #[test]
    fn test_profile_length_matches_board() {
        let config = Config::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let profile = generate(&config, &mut rng);
        assert_eq!(profile.len(), 900);
        assert_eq!(profile.board_height(), 500.0);
    }

    #[test]
    fn test_flat_walk() {
        // Start mid-board with zero slope, then never perturb
        let config = board(4, 10);
        let mut rng = ScriptedSource::new(&[0.5, 0.5]);
        let profile = generate(&config, &mut rng);
        assert_eq!(profile.heights(), &[5.0, 5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_reflects_off_ceiling() {
        // height 4.95, slope +2.0: the first step overshoots 5
        let config = board(5, 5);
        let mut rng = ScriptedSource::new(&[0.99, 0.9]);
        let steps: Vec<WalkStep> = TerrainWalk::new(&config, &mut rng).collect();

        assert_eq!(steps[0].height, 5.0);
        assert_eq!(steps[0].slope, -2.0);
        assert_eq!(steps[1].height, 3.0);
        assert!(steps[1].slope < 0.0);
    }

    #[test]
    fn test_reflects_off_floor() {
        // height 0.5, slope -2.0
        let config = board(3, 5);
        let mut rng = ScriptedSource::new(&[0.1, 0.1]);
        let steps: Vec<WalkStep> = TerrainWalk::new(&config, &mut rng).collect();

        assert_eq!(steps[0].height, 0.0);
        assert_eq!(steps[0].slope, 2.0);
        assert_eq!(steps[1].height, 2.0);
    }

    #[test]
    fn test_slope_clamped() {
        // Max starting slope plus max perturbation must saturate at STEP_MAX
        let config = board(3, 1000);
        let mut rng = ScriptedSource::new(&[0.0, 0.999_999, 0.999_999, 0.999_999]);
        let steps: Vec<WalkStep> = TerrainWalk::new(&config, &mut rng).collect();
        assert!(steps.iter().all(|s| s.slope <= STEP_MAX));
        assert_eq!(steps[2].slope, STEP_MAX);
    }

    #[test]
    fn test_flatten_levels_pad() {
        let mut profile = TerrainProfile::from_heights(vec![1.0, 2.0, 3.0, 4.0, 5.0], 10);
        profile.flatten(1, 3);
        assert_eq!(profile.heights(), &[1.0, 2.0, 2.0, 2.0, 5.0]);

        // Pads running off the edge are cut short
        profile.flatten(3, 10);
        assert_eq!(profile.heights(), &[1.0, 2.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_crater_digs_bowl() {
        let mut profile = TerrainProfile::from_heights(vec![10.0; 11], 100);
        let touched = profile.crater(5, 3);
        assert_eq!(touched, 2..9);

        let h = profile.heights();
        assert_eq!(h[5], 13.0);
        assert!(h[4] > 10.0 && h[4] < 13.0);
        assert_eq!(h[4], h[6]);
        assert_eq!(h[2], 10.0);
        assert_eq!(h[1], 10.0);
    }

    #[test]
    fn test_crater_clamps_to_bottom_and_edges() {
        let mut profile = TerrainProfile::from_heights(vec![98.0; 4], 100);
        let touched = profile.crater(0, 30);
        assert_eq!(touched, 0..4);
        assert!(profile.heights().iter().all(|&h| h == 100.0));

        assert_eq!(profile.crater(10, 3), 10..10);
    }

    proptest! {
        #[test]
        fn prop_samples_and_slope_bounded(
            seed in any::<u64>(),
            width in 1u32..600,
            height in 1u32..600,
        ) {
            let config = board(width, height);
            let mut rng = Pcg32::seed_from_u64(seed);
            let ceiling = height as f64;
            let mut count = 0;
            for step in TerrainWalk::new(&config, &mut rng) {
                prop_assert!((0.0..=ceiling).contains(&step.height));
                prop_assert!(step.slope.abs() <= STEP_MAX);
                count += 1;
            }
            prop_assert_eq!(count, width as usize);
        }

        #[test]
        fn prop_generation_is_deterministic(seed in any::<u64>(), width in 1u32..300) {
            let config = board(width, 200);
            let a = generate(&config, &mut Pcg32::seed_from_u64(seed));
            let b = generate(&config, &mut Pcg32::seed_from_u64(seed));
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_crater_stays_in_bounds(
            seed in any::<u64>(),
            center in 0usize..200,
            radius in 1u32..80,
        ) {
            let config = board(150, 120);
            let mut profile = generate(&config, &mut Pcg32::seed_from_u64(seed));
            profile.crater(center, radius);
            prop_assert!(profile.heights().iter().all(|&h| (0.0..=120.0).contains(&h)));
        }
    }
}
