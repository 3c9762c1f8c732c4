//! # SYLVAN Procedural Generation
//!
//! Deterministic side-scrolling world generation, streamed around a
//! moving viewpoint.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and x always produce the same content
//! 2. **Stateless randomness**: Every decision is keyed on coordinates, never on call order
//! 3. **Streamed**: At most three spans are alive; evicted spans are regenerated, not cached
//!
//! ## Core Components
//!
//! - `HeightField`: ground surface as a function of x
//! - `SeededPlacer`: per-coordinate random streams
//! - `RegionGenerator`: terrain columns and trees for a span
//! - `WorldWindow`: behind / current / ahead sliding window
//!
//! ## Example
//!
//! ```rust
//! use sylvan_procedural::{LayerHint, SpawnedEntity, WorldConfig, WorldHost, WorldWindow};
//!
//! #[derive(Default)]
//! struct Counter(usize);
//!
//! impl WorldHost for Counter {
//!     fn on_entity_created(&mut self, _: &SpawnedEntity, _: LayerHint) {
//!         self.0 += 1;
//!     }
//!     fn on_entity_destroyed(&mut self, _: &SpawnedEntity, _: LayerHint) {
//!         self.0 -= 1;
//!     }
//! }
//!
//! let mut host = Counter::default();
//! let mut window = WorldWindow::new(&WorldConfig::default(), 450.0, &mut host).unwrap();
//!
//! // Walk right into the next span.
//! window.update(1500.0, &mut host);
//! assert_eq!(window.current().map(|s| s.index()), Some(1));
//! assert_eq!(host.0 as u64, window.stats().live_entities());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod entity;
pub mod error;
pub mod height_field;
pub mod noise;
pub mod placer;
pub mod region;
pub mod seed;
pub mod window;

pub use config::{NoiseConfig, VegetationConfig, WorldConfig};
pub use entity::{
    CanopySlot, EntityId, Foliage, Fruit, FruitColor, LayerHint, Rect, Rgb, SpawnedEntity,
    TerrainCell, Trunk, WorldEntity,
};
pub use error::{WorldError, WorldResult};
pub use height_field::HeightField;
pub use noise::SimplexNoise;
pub use placer::{PlacementStream, Purpose, SeededPlacer};
pub use region::{Region, RegionGenerator, Tree, WorldSpan, WORLD_LIMIT};
pub use seed::WorldSeed;
pub use window::{
    ActiveSpan, Direction, Transition, WorldHost, WorldStats, WorldWindow, AHEAD, BEHIND, CURRENT,
};
