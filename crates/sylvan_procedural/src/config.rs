//! # World Configuration
//!
//! All tunables for generation and streaming, loaded once at startup.
//!
//! Every field has a default, so a TOML file only needs to name what it
//! overrides:
//!
//! ```toml
//! seed = 10
//! span_width = 1000.0
//!
//! [vegetation]
//! trunk_chance = 0.15
//! ```
//!
//! `validate` fails fast on nonsensical values; nothing is silently clamped.

use std::path::Path;

use serde::Deserialize;

use crate::error::{WorldError, WorldResult};
use crate::seed::WorldSeed;

/// Height-field noise parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoiseConfig {
    /// Maximum vertical offset from the base height, in world units.
    pub amplitude: f32,
    /// Horizontal distance covered by one noise unit.
    pub wavelength: f32,
    /// Fractal octaves.
    pub octaves: u32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            amplitude: 210.0,
            wavelength: 210.0,
            octaves: 3,
        }
    }
}

/// Tree placement parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VegetationConfig {
    /// Trunk width; also the step between candidate trunk columns.
    pub trunk_width: f32,
    /// Shortest trunk (inclusive).
    pub trunk_min_height: u32,
    /// Tallest trunk (exclusive).
    pub trunk_max_height: u32,
    /// Probability that a candidate column grows a tree.
    pub trunk_chance: f64,
    /// Probability that a canopy slot holds foliage.
    pub foliage_chance: f64,
    /// Probability that a non-foliage slot above the trunk holds fruit.
    pub fruit_chance: f64,
    /// Canopy rows above the trunk's top edge.
    pub canopy_rise_cells: u32,
    /// Canopy columns on each side of the trunk.
    pub canopy_margin_cells: u32,
}

impl Default for VegetationConfig {
    fn default() -> Self {
        Self {
            trunk_width: 30.0,
            trunk_min_height: 100,
            trunk_max_height: 200,
            trunk_chance: 0.1,
            foliage_chance: 0.7,
            fruit_chance: 0.3,
            canopy_rise_cells: 3,
            canopy_margin_cells: 2,
        }
    }
}

/// Configuration for the whole procedural world.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Global seed.
    pub seed: WorldSeed,
    /// Width of one span (one viewport).
    pub span_width: f32,
    /// Vertical extent of the viewport; ground sits at two thirds of it.
    pub viewport_height: f32,
    /// Terrain cell size.
    pub cell_size: f32,
    /// Cells stacked below the surface in each terrain column.
    pub terrain_depth: u32,
    /// Distance from a span edge at which the neighbour is generated early.
    /// Zero generates only on crossing.
    pub prefetch_margin: f32,
    /// Initial viewpoint x.
    pub avatar_start_x: f32,
    /// Height-field noise.
    pub noise: NoiseConfig,
    /// Tree placement.
    pub vegetation: VegetationConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: WorldSeed::default(),
            span_width: 1000.0,
            viewport_height: 900.0,
            cell_size: 30.0,
            terrain_depth: 20,
            prefetch_margin: 0.0,
            avatar_start_x: 450.0,
            noise: NoiseConfig::default(),
            vegetation: VegetationConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Creates the default configuration with a specific seed.
    #[must_use]
    pub fn with_seed(seed: WorldSeed) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// `ConfigParse` for malformed TOML or unknown keys, or any validation
    /// error from [`WorldConfig::validate`].
    pub fn from_toml_str(source: &str) -> WorldResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| WorldError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// `ConfigIo` if the file cannot be read, otherwise as
    /// [`WorldConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> WorldResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| WorldError::ConfigIo(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Checks every field.
    ///
    /// # Errors
    ///
    /// The first offending field, as a [`WorldError`].
    pub fn validate(&self) -> WorldResult<()> {
        positive("span_width", self.span_width)?;
        positive("viewport_height", self.viewport_height)?;
        positive("cell_size", self.cell_size)?;
        positive("terrain_depth", self.terrain_depth as f32)?;
        finite("prefetch_margin", self.prefetch_margin)?;
        finite("avatar_start_x", self.avatar_start_x)?;
        if self.prefetch_margin < 0.0 {
            return Err(WorldError::NonPositive {
                field: "prefetch_margin",
                value: f64::from(self.prefetch_margin),
            });
        }

        finite("noise.amplitude", self.noise.amplitude)?;
        positive("noise.wavelength", self.noise.wavelength)?;

        let veg = &self.vegetation;
        positive("vegetation.trunk_width", veg.trunk_width)?;
        positive("vegetation.trunk_min_height", veg.trunk_min_height as f32)?;
        if veg.trunk_min_height >= veg.trunk_max_height {
            return Err(WorldError::InvalidRange {
                field: "vegetation.trunk_height",
                min: f64::from(veg.trunk_min_height),
                max: f64::from(veg.trunk_max_height),
            });
        }
        probability("vegetation.trunk_chance", veg.trunk_chance)?;
        probability("vegetation.foliage_chance", veg.foliage_chance)?;
        probability("vegetation.fruit_chance", veg.fruit_chance)?;

        Ok(())
    }

    /// Base ground height: two thirds down the viewport.
    #[inline]
    #[must_use]
    pub fn base_height(&self) -> f32 {
        self.viewport_height * 2.0 / 3.0
    }

    /// Span width rounded up to a whole number of cells.
    #[must_use]
    pub fn aligned_span_width(&self) -> f32 {
        (self.span_width / self.cell_size).ceil() * self.cell_size
    }
}

fn finite(field: &'static str, value: f32) -> WorldResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(WorldError::NotFinite {
            field,
            value: f64::from(value),
        })
    }
}

fn positive(field: &'static str, value: f32) -> WorldResult<()> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(WorldError::NonPositive {
            field,
            value: f64::from(value),
        })
    }
}

fn probability(field: &'static str, value: f64) -> WorldResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(WorldError::InvalidProbability { field, value })
    }
}
