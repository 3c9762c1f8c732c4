//! # Region Generation
//!
//! Turns a horizontal span into terrain columns and trees.
//!
//! ## Tiling
//!
//! Terrain columns are taken from the span snapped outward to the cell
//! grid. Trunk columns sit on multiples of the trunk width and belong to
//! the span containing their left edge. For cell-aligned spans this means
//! `[a, b)` + `[b, c)` generates exactly what `[a, c)` does.
//!
//! ## Determinism
//!
//! Nothing here is cached. Every decision is a fresh `SeededPlacer`
//! stream keyed on world coordinates, so regenerating a span reproduces it.

use std::ops::Range;

use crate::config::WorldConfig;
use crate::entity::{CanopySlot, Foliage, Fruit, FruitColor, Rgb, TerrainCell, Trunk, WorldEntity};
use crate::error::{WorldError, WorldResult};
use crate::height_field::HeightField;
use crate::placer::{Purpose, SeededPlacer};

/// Per-channel tint spread for terrain cells.
const TERRAIN_TINT_SPREAD: i16 = 10;

/// Largest world coordinate magnitude a span bound may take.
///
/// Up to 2^24 every whole unit is exactly representable in `f32`, so span
/// bounds and cell edges stay distinct and ordered.
pub const WORLD_LIMIT: f32 = 16_777_216.0;

/// Half-open horizontal range `[min_x, max_x)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldSpan {
    min_x: f32,
    max_x: f32,
}

impl WorldSpan {
    /// Creates a span.
    ///
    /// # Errors
    ///
    /// `InvalidSpan` if either bound is not finite or `min_x >= max_x`.
    pub fn new(min_x: f32, max_x: f32) -> WorldResult<Self> {
        if !min_x.is_finite() || !max_x.is_finite() || min_x >= max_x {
            return Err(WorldError::InvalidSpan { min_x, max_x });
        }
        Ok(Self { min_x, max_x })
    }

    /// The `index`-th span of width `width`: `[index * width, (index + 1) * width)`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if a bound lies beyond [`WORLD_LIMIT`], `InvalidSpan`
    /// if `width` is not positive and finite.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn at_index(index: i64, width: f32) -> WorldResult<Self> {
        let width = f64::from(width);
        let min_x = index as f64 * width;
        let max_x = index.saturating_add(1) as f64 * width;
        let limit = f64::from(WORLD_LIMIT);
        for (field, value) in [("min_x", min_x), ("max_x", max_x)] {
            if value.abs() > limit {
                return Err(WorldError::OutOfRange { field, value, limit });
            }
        }
        Self::new(min_x as f32, max_x as f32)
    }

    /// Left bound (inclusive).
    #[inline]
    #[must_use]
    pub fn min_x(&self) -> f32 {
        self.min_x
    }

    /// Right bound (exclusive).
    #[inline]
    #[must_use]
    pub fn max_x(&self) -> f32 {
        self.max_x
    }

    /// Width.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// True if `min_x <= x < max_x`.
    #[inline]
    #[must_use]
    pub fn contains(&self, x: f32) -> bool {
        x >= self.min_x && x < self.max_x
    }

    /// Grid indices of the `step`-sized columns covering the span, snapped
    /// outward.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn columns_outward(&self, step: f32) -> Range<i64> {
        let step = f64::from(step);
        let first = (f64::from(self.min_x) / step).floor() as i64;
        let end = (f64::from(self.max_x) / step).ceil() as i64;
        first..end
    }

    /// Grid indices of the `step`-sized columns whose left edge lies inside
    /// the span.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn columns_owned(&self, step: f32) -> Range<i64> {
        let step = f64::from(step);
        let first = (f64::from(self.min_x) / step).ceil() as i64;
        let end = (f64::from(self.max_x) / step).ceil() as i64;
        first..end
    }

    /// The span expanded outward to the nearest grid lines.
    #[must_use]
    pub fn snapped(&self, step: f32) -> Self {
        let columns = self.columns_outward(step);
        Self {
            min_x: grid_to_world(columns.start, step),
            max_x: grid_to_world(columns.end, step),
        }
    }
}

/// World x of grid line `index` for a grid of `step`-sized cells.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn grid_to_world(index: i64, step: f32) -> f32 {
    (index as f64 * f64::from(step)) as f32
}

/// A trunk and its canopy.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    /// The trunk.
    pub trunk: Trunk,
    /// Leaf blocks.
    pub foliage: Vec<Foliage>,
    /// Fruit.
    pub fruit: Vec<Fruit>,
}

/// Everything generated for one span.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    /// The span as requested.
    pub span: WorldSpan,
    /// Ground blocks, column by column, top to bottom.
    pub terrain: Vec<TerrainCell>,
    /// Trees, left to right.
    pub trees: Vec<Tree>,
}

impl Region {
    /// Total number of entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.terrain.len()
            + self
                .trees
                .iter()
                .map(|t| 1 + t.foliage.len() + t.fruit.len())
                .sum::<usize>()
    }

    /// Flattens the region: terrain first, then each tree as trunk,
    /// foliage, fruit.
    pub fn into_entities(self) -> impl Iterator<Item = WorldEntity> {
        let terrain = self.terrain.into_iter().map(WorldEntity::Terrain);
        let trees = self.trees.into_iter().flat_map(|tree| {
            std::iter::once(WorldEntity::Trunk(tree.trunk))
                .chain(tree.foliage.into_iter().map(WorldEntity::Foliage))
                .chain(tree.fruit.into_iter().map(WorldEntity::Fruit))
        });
        terrain.chain(trees)
    }
}

/// Region generator: HeightField + SeededPlacer.
#[derive(Clone)]
pub struct RegionGenerator {
    config: WorldConfig,
    height_field: HeightField,
    placer: SeededPlacer,
}

impl RegionGenerator {
    /// Creates a generator.
    ///
    /// # Errors
    ///
    /// Any configuration error from [`WorldConfig::validate`].
    pub fn new(config: &WorldConfig) -> WorldResult<Self> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            height_field: HeightField::new(config),
            placer: SeededPlacer::new(config.seed),
        })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The height field.
    #[must_use]
    pub fn height_field(&self) -> &HeightField {
        &self.height_field
    }

    /// The placer.
    #[must_use]
    pub fn placer(&self) -> &SeededPlacer {
        &self.placer
    }

    /// Generates a span.
    #[must_use]
    pub fn generate(&self, span: WorldSpan) -> Region {
        let cell = self.config.cell_size;

        let mut terrain = Vec::new();
        for grid_x in span.columns_outward(cell) {
            self.push_column(grid_x, &mut terrain);
        }

        let trees = span
            .columns_owned(self.config.vegetation.trunk_width)
            .filter_map(|column| self.tree_at(column))
            .collect();

        Region { span, terrain, trees }
    }

    /// Stacks one terrain column downward from the snapped surface.
    #[allow(clippy::cast_possible_truncation)]
    fn push_column(&self, grid_x: i64, out: &mut Vec<TerrainCell>) {
        let x = grid_to_world(grid_x, self.config.cell_size);
        let grid_x = grid_x as i32;
        let top = self.height_field.surface_row(x);

        for depth in 0..self.config.terrain_depth {
            let grid_y = top + depth as i32;
            let mut tint = self
                .placer
                .stream(Purpose::TerrainTint, &[i64::from(grid_x), i64::from(grid_y)]);
            let style = Rgb::GROUND.offset(
                tint.jitter(TERRAIN_TINT_SPREAD),
                tint.jitter(TERRAIN_TINT_SPREAD),
                tint.jitter(TERRAIN_TINT_SPREAD),
            );
            out.push(TerrainCell { grid_x, grid_y, style });
        }
    }

    /// The tree rooted in trunk column `column`, if one grows there.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn tree_at(&self, column: i64) -> Option<Tree> {
        let veg = &self.config.vegetation;
        if !self
            .placer
            .stream(Purpose::TrunkPresence, &[column])
            .chance(veg.trunk_chance)
        {
            return None;
        }

        let x = grid_to_world(column, veg.trunk_width);
        let height = self
            .placer
            .stream(Purpose::TrunkHeight, &[column])
            .range(veg.trunk_min_height..veg.trunk_max_height);
        let trunk = Trunk {
            x,
            base_y: self.height_field.surface_y(x),
            width: veg.trunk_width,
            height: height as f32,
        };

        let (foliage, fruit) = self.grow_canopy(column, &trunk);
        tracing::trace!(
            x,
            height,
            foliage = foliage.len(),
            fruit = fruit.len(),
            "tree placed"
        );
        Some(Tree { trunk, foliage, fruit })
    }

    /// Fills the canopy grid around a trunk.
    ///
    /// Rows start `canopy_rise_cells` above the trunk top and continue
    /// while the row's top edge is above the trunk's vertical centre.
    /// Foliage may take any slot; fruit only slots above the trunk top.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_precision_loss)]
    fn grow_canopy(&self, column: i64, trunk: &Trunk) -> (Vec<Foliage>, Vec<Fruit>) {
        let veg = &self.config.vegetation;
        let cell = self.config.cell_size;
        let trunk_cells = ((trunk.width / cell).ceil() as i32).max(1);
        let margin = veg.canopy_margin_cells as i32;

        let mut foliage = Vec::new();
        let mut fruit = Vec::new();

        let mut row = -(veg.canopy_rise_cells as i32);
        loop {
            let y = trunk.top() + row as f32 * cell;
            if y >= trunk.center_y() {
                break;
            }
            for col in -margin..trunk_cells + margin {
                let slot = CanopySlot { column: col, row };
                let x = trunk.x + col as f32 * cell;
                let mut stream = self.placer.stream(
                    Purpose::Canopy,
                    &[column, i64::from(col), i64::from(row)],
                );

                if stream.chance(veg.foliage_chance) {
                    foliage.push(Foliage {
                        trunk_x: trunk.x,
                        slot,
                        x,
                        y,
                        size: cell,
                        phase: stream.unit(),
                    });
                } else if y < trunk.top() && stream.chance(veg.fruit_chance) {
                    let color = stream
                        .pick(&FruitColor::ALL)
                        .copied()
                        .unwrap_or(FruitColor::Red);
                    fruit.push(Fruit {
                        trunk_x: trunk.x,
                        slot,
                        x,
                        y,
                        size: cell,
                        color,
                    });
                }
            }
            row += 1;
        }

        (foliage, fruit)
    }
}
