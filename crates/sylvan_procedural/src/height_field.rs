//! # Height Field
//!
//! Maps a world x to the ground surface y.
//!
//! `x == 0` is the generation origin and returns the bare base height.
//! Everywhere else the surface is the base height plus smooth fractal
//! noise sampled along a fixed row of the noise plane.

use crate::config::{NoiseConfig, WorldConfig};
use crate::noise::SimplexNoise;
use crate::seed::WorldSeed;

/// Noise-plane row the 1D profile is read from.
const SAMPLE_ROW: f64 = 7.0;

/// Per-octave amplitude decay.
const PERSISTENCE: f64 = 0.5;

/// Per-octave frequency growth.
const LACUNARITY: f64 = 2.0;

/// Salt separating the terrain noise from other uses of the seed.
const TERRAIN_SALT: u64 = 0x7E44_A1;

/// Ground surface as a pure function of x.
#[derive(Clone)]
pub struct HeightField {
    noise: SimplexNoise,
    base_height: f32,
    amplitude: f64,
    wavelength: f64,
    octaves: u32,
    cell_size: f32,
}

impl HeightField {
    /// Builds the height field for a validated configuration.
    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        Self::with_params(config.seed, config.base_height(), config.cell_size, &config.noise)
    }

    /// Builds a height field from explicit parameters.
    #[must_use]
    pub fn with_params(seed: WorldSeed, base_height: f32, cell_size: f32, noise: &NoiseConfig) -> Self {
        Self {
            noise: SimplexNoise::new(seed.derive(TERRAIN_SALT)),
            base_height,
            amplitude: f64::from(noise.amplitude),
            wavelength: f64::from(noise.wavelength),
            octaves: noise.octaves,
            cell_size,
        }
    }

    /// Base height at the origin.
    #[inline]
    #[must_use]
    pub fn base_height(&self) -> f32 {
        self.base_height
    }

    /// Ground surface y at `x`.
    ///
    /// Bounded by `base_height ± amplitude`, continuous everywhere except
    /// the origin anchor.
    #[must_use]
    #[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
    pub fn height(&self, x: f32) -> f32 {
        if x == 0.0 {
            return self.base_height;
        }
        let offset = self.noise.fbm(
            f64::from(x) / self.wavelength,
            SAMPLE_ROW,
            self.octaves,
            PERSISTENCE,
            LACUNARITY,
        ) * self.amplitude;
        self.base_height + offset as f32
    }

    /// Surface snapped down to the cell grid (the top edge of the top cell).
    #[must_use]
    pub fn surface_y(&self, x: f32) -> f32 {
        (self.height(x) / self.cell_size).floor() * self.cell_size
    }

    /// Surface row index on the cell grid.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn surface_row(&self, x: f32) -> i32 {
        (self.height(x) / self.cell_size).floor() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(seed: u64) -> HeightField {
        HeightField::new(&WorldConfig::with_seed(WorldSeed::new(seed)))
    }

    #[test]
    fn test_origin_is_base_height() {
        for seed in [0, 1, 10, 42, 12345, u64::MAX] {
            let hf = field(seed);
            assert_eq!(hf.height(0.0), 600.0, "seed {seed}");
            assert_eq!(hf.height(-0.0), 600.0, "seed {seed}");
        }
    }

    #[test]
    fn test_determinism_across_instances() {
        let a = field(10);
        let b = field(10);
        for i in -500..500 {
            let x = i as f32 * 7.3;
            assert_eq!(a.height(x).to_bits(), b.height(x).to_bits());
        }
    }

    #[test]
    fn test_bounded() {
        let hf = field(42);
        for i in -2000..2000 {
            let h = hf.height(i as f32 * 13.0 + 0.5);
            assert!((390.0..=810.0).contains(&h), "height {h} out of bounds");
        }
    }

    #[test]
    fn test_smooth_between_columns() {
        let hf = field(7);
        for i in 1..1000 {
            let x = i as f32 * 3.0;
            let step = (hf.height(x) - hf.height(x + 1.0)).abs();
            assert!(step < 20.0, "jump of {step} at x = {x}");
        }
    }

    #[test]
    fn test_seeds_differ() {
        let a = field(1);
        let b = field(2);
        assert!((1..100).any(|i| a.height(i as f32 * 30.0) != b.height(i as f32 * 30.0)));
    }

    #[test]
    fn test_surface_is_cell_aligned() {
        let hf = field(10);
        for i in -100..100 {
            let x = i as f32 * 30.0;
            let surface = hf.surface_y(x);
            assert_eq!(surface % 30.0, 0.0);
            assert!(surface <= hf.height(x));
            assert!(hf.height(x) - surface < 30.0);
            assert_eq!(surface, hf.surface_row(x) as f32 * 30.0);
        }
    }

    #[test]
    fn test_finite_for_extreme_input() {
        let hf = field(3);
        for x in [f32::MAX, f32::MIN, 1e20, -1e20, f32::MIN_POSITIVE] {
            assert!(hf.height(x).is_finite());
        }
    }
}
