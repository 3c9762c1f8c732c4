//! # World Entities
//!
//! Everything a span generates is one `WorldEntity` variant. The host
//! decides rendering and physics from the variant and its `LayerHint`;
//! entities themselves carry geometry and visual style only.
//!
//! Coordinates are world units with y growing downward.

/// Where the host should place an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerHint {
    /// Decorative, non-colliding (foliage).
    Background,
    /// Colliding / static objects (terrain, trunks, fruit).
    Solid,
}

/// An RGB tint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    /// Base ground colour.
    pub const GROUND: Self = Self::new(212, 123, 74);
    /// Trunk colour.
    pub const TRUNK: Self = Self::new(100, 50, 20);
    /// Foliage colour.
    pub const FOLIAGE: Self = Self::new(50, 200, 30);

    /// Creates a colour.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Offsets each channel independently, saturating at 0 and 255.
    #[must_use]
    pub fn offset(self, dr: i16, dg: i16, db: i16) -> Self {
        let shift = |c: u8, d: i16| -> u8 {
            let v = (i16::from(c) + d).clamp(0, 255);
            u8::try_from(v).unwrap_or(u8::MAX)
        };
        Self::new(shift(self.r, dr), shift(self.g, dg), shift(self.b, db))
    }
}

/// Axis-aligned rectangle: top-left corner plus size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Horizontal centre.
    #[inline]
    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.x + self.width * 0.5
    }

    /// True if the point lies inside (left/top inclusive, right/bottom exclusive).
    #[inline]
    #[must_use]
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// One ground block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainCell {
    /// Column index (world x = `grid_x * cell_size`).
    pub grid_x: i32,
    /// Row index (world y = `grid_y * cell_size`).
    pub grid_y: i32,
    /// Visual tint.
    pub style: Rgb,
}

/// A tree trunk standing on the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trunk {
    /// Left edge; a multiple of the trunk width.
    pub x: f32,
    /// Ground line the trunk stands on (its bottom edge).
    pub base_y: f32,
    /// Trunk width.
    pub width: f32,
    /// Trunk height.
    pub height: f32,
}

impl Trunk {
    /// Top edge.
    #[inline]
    #[must_use]
    pub fn top(&self) -> f32 {
        self.base_y - self.height
    }

    /// Vertical centre.
    #[inline]
    #[must_use]
    pub fn center_y(&self) -> f32 {
        self.base_y - self.height * 0.5
    }
}

/// Position of a canopy cell relative to its trunk, in cells.
///
/// `column` 0 is the trunk's own column; `row` 0 starts at the trunk top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanopySlot {
    /// Horizontal offset in cells.
    pub column: i32,
    /// Vertical offset in cells (negative is above the trunk top).
    pub row: i32,
}

/// A leaf block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Foliage {
    /// Left edge of the owning trunk.
    pub trunk_x: f32,
    /// Slot on the owning trunk's canopy grid.
    pub slot: CanopySlot,
    /// Top-left corner x.
    pub x: f32,
    /// Top-left corner y.
    pub y: f32,
    /// Edge length.
    pub size: f32,
    /// Animation phase offset in `[0, 1)`.
    pub phase: f32,
}

/// Fruit colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FruitColor {
    /// Red.
    Red,
    /// Orange.
    Orange,
}

impl FruitColor {
    /// All colours, in selection order.
    pub const ALL: [Self; 2] = [Self::Red, Self::Orange];

    /// RGB value.
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Red => Rgb::new(255, 0, 0),
            Self::Orange => Rgb::new(255, 200, 0),
        }
    }
}

/// A collectible fruit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fruit {
    /// Left edge of the owning trunk.
    pub trunk_x: f32,
    /// Slot on the owning trunk's canopy grid.
    pub slot: CanopySlot,
    /// Top-left corner x.
    pub x: f32,
    /// Top-left corner y.
    pub y: f32,
    /// Diameter.
    pub size: f32,
    /// Colour.
    pub color: FruitColor,
}

/// Anything a span can generate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WorldEntity {
    /// Ground block.
    Terrain(TerrainCell),
    /// Tree trunk.
    Trunk(Trunk),
    /// Leaf block.
    Foliage(Foliage),
    /// Fruit.
    Fruit(Fruit),
}

impl WorldEntity {
    /// Layer the host should use.
    #[must_use]
    pub const fn layer(&self) -> LayerHint {
        match self {
            Self::Foliage(_) => LayerHint::Background,
            Self::Terrain(_) | Self::Trunk(_) | Self::Fruit(_) => LayerHint::Solid,
        }
    }

    /// World-space bounds. Terrain needs the cell size to resolve its grid.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn bounds(&self, cell_size: f32) -> Rect {
        match self {
            Self::Terrain(cell) => Rect::new(
                cell.grid_x as f32 * cell_size,
                cell.grid_y as f32 * cell_size,
                cell_size,
                cell_size,
            ),
            Self::Trunk(trunk) => Rect::new(trunk.x, trunk.top(), trunk.width, trunk.height),
            Self::Foliage(leaf) => Rect::new(leaf.x, leaf.y, leaf.size, leaf.size),
            Self::Fruit(fruit) => Rect::new(fruit.x, fruit.y, fruit.size, fruit.size),
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Terrain(_) => "terrain",
            Self::Trunk(_) => "trunk",
            Self::Foliage(_) => "foliage",
            Self::Fruit(_) => "fruit",
        }
    }
}

/// Session-unique entity handle, assigned when a span materializes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// A generated entity plus its handle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnedEntity {
    /// Handle.
    pub id: EntityId,
    /// Payload.
    pub entity: WorldEntity,
}

impl SpawnedEntity {
    /// Layer of the payload.
    #[inline]
    #[must_use]
    pub const fn layer(&self) -> LayerHint {
        self.entity.layer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_dispatch() {
        let slot = CanopySlot { column: 0, row: -1 };
        let leaf = WorldEntity::Foliage(Foliage {
            trunk_x: 0.0,
            slot,
            x: 0.0,
            y: 0.0,
            size: 30.0,
            phase: 0.5,
        });
        let fruit = WorldEntity::Fruit(Fruit {
            trunk_x: 0.0,
            slot,
            x: 0.0,
            y: 0.0,
            size: 30.0,
            color: FruitColor::Red,
        });
        let cell = WorldEntity::Terrain(TerrainCell {
            grid_x: 0,
            grid_y: 20,
            style: Rgb::GROUND,
        });

        assert_eq!(leaf.layer(), LayerHint::Background);
        assert_eq!(fruit.layer(), LayerHint::Solid);
        assert_eq!(cell.layer(), LayerHint::Solid);
    }

    #[test]
    fn test_trunk_geometry() {
        let trunk = Trunk {
            x: 60.0,
            base_y: 600.0,
            width: 30.0,
            height: 150.0,
        };
        assert_eq!(trunk.top(), 450.0);
        assert_eq!(trunk.center_y(), 525.0);
        assert_eq!(
            WorldEntity::Trunk(trunk).bounds(30.0),
            Rect::new(60.0, 450.0, 30.0, 150.0)
        );
    }

    #[test]
    fn test_terrain_bounds() {
        let cell = WorldEntity::Terrain(TerrainCell {
            grid_x: -2,
            grid_y: 21,
            style: Rgb::GROUND,
        });
        assert_eq!(cell.bounds(30.0), Rect::new(-60.0, 630.0, 30.0, 30.0));
    }

    #[test]
    fn test_rgb_offset_saturates() {
        assert_eq!(Rgb::new(250, 5, 100).offset(10, 10, 10), Rgb::new(255, 15, 110));
        assert_eq!(Rgb::new(250, 5, 100).offset(-10, -10, 0), Rgb::new(240, 0, 100));
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(0.0, 0.0, 30.0, 30.0);
        assert!(rect.contains(0.0, 0.0));
        assert!(rect.contains(29.9, 29.9));
        assert!(!rect.contains(30.0, 10.0));
    }
}
