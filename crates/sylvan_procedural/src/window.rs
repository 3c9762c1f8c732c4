//! # World Window
//!
//! Three-slot sliding window of materialized spans around the viewpoint.
//!
//! ```text
//!   ┌──────────┬──────────┬──────────┐
//!   │  BEHIND  │ CURRENT  │  AHEAD   │
//!   │  k - 1   │    k     │  k + 1   │
//!   └──────────┴──────────┴──────────┘
//!                   ▲ viewpoint
//! ```
//!
//! Span `k` covers `[k * W, (k + 1) * W)`. Crossing an edge of `CURRENT`
//! generates the neighbour on that side if it is missing, evicts the slot
//! on the far side and rotates the array. Adjacent slots are filled lazily,
//! on first crossing or on approach when a prefetch margin is configured.
//!
//! Transition selection ([`WorldWindow::plan`]) is pure; only
//! [`WorldWindow::update`] touches the host.
//!
//! Viewpoints whose neighbouring spans would reach past [`WORLD_LIMIT`] are
//! ignored; the window holds its last state there.

use crate::config::WorldConfig;
use crate::entity::{EntityId, LayerHint, SpawnedEntity};
use crate::error::{WorldError, WorldResult};
use crate::region::{RegionGenerator, WorldSpan, WORLD_LIMIT};

/// Slot index of the span left of the viewpoint.
pub const BEHIND: usize = 0;
/// Slot index of the span holding the viewpoint.
pub const CURRENT: usize = 1;
/// Slot index of the span right of the viewpoint.
pub const AHEAD: usize = 2;

/// Receives entity lifecycle callbacks.
pub trait WorldHost {
    /// Called once per entity when its span is generated.
    fn on_entity_created(&mut self, entity: &SpawnedEntity, layer: LayerHint);

    /// Called once per entity when its span is evicted.
    fn on_entity_destroyed(&mut self, entity: &SpawnedEntity, layer: LayerHint);
}

/// A generated span and the entities it owns.
#[derive(Debug)]
pub struct ActiveSpan {
    index: i64,
    span: WorldSpan,
    entities: Vec<SpawnedEntity>,
}

impl ActiveSpan {
    /// Span index `k`.
    #[inline]
    #[must_use]
    pub fn index(&self) -> i64 {
        self.index
    }

    /// Bounds.
    #[inline]
    #[must_use]
    pub fn span(&self) -> WorldSpan {
        self.span
    }

    /// Owned entities, in creation order.
    #[must_use]
    pub fn entities(&self) -> &[SpawnedEntity] {
        &self.entities
    }
}

/// Horizontal direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Decreasing x.
    Left,
    /// Increasing x.
    Right,
}

/// Structural change chosen for a viewpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Nothing to do.
    Stay,
    /// Fill the empty neighbour on one side without rotating.
    Prefetch(Direction),
    /// Viewpoint moved into the adjacent span: fill it if needed, evict the
    /// far slot, rotate.
    Step(Direction),
    /// Viewpoint is not in or next to `CURRENT`: evict everything and build
    /// `CURRENT` at `index`.
    Rebuild {
        /// Span index holding the viewpoint.
        index: i64,
    },
}

/// Session counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Spans generated this session.
    pub spans_generated: u64,
    /// Spans evicted this session.
    pub spans_evicted: u64,
    /// Entities handed to the host.
    pub entities_created: u64,
    /// Entities taken back from the host.
    pub entities_destroyed: u64,
}

impl WorldStats {
    /// Entities currently alive in the host.
    #[inline]
    #[must_use]
    pub fn live_entities(&self) -> u64 {
        self.entities_created - self.entities_destroyed
    }
}

/// The sliding window.
pub struct WorldWindow {
    generator: RegionGenerator,
    span_width: f32,
    prefetch_margin: f32,
    slots: [Option<ActiveSpan>; 3],
    next_id: u64,
    stats: WorldStats,
}

impl WorldWindow {
    /// Validates `config` and generates `CURRENT` around `initial_x`.
    ///
    /// # Errors
    ///
    /// Any configuration error, `NotFinite` for a non-finite `initial_x`, or
    /// `OutOfRange` when `initial_x` is too close to [`WORLD_LIMIT`].
    #[allow(clippy::float_cmp)]
    pub fn new<H: WorldHost + ?Sized>(
        config: &WorldConfig,
        initial_x: f32,
        host: &mut H,
    ) -> WorldResult<Self> {
        let generator = RegionGenerator::new(config)?;
        if !initial_x.is_finite() {
            return Err(WorldError::NotFinite {
                field: "initial_x",
                value: f64::from(initial_x),
            });
        }

        let span_width = config.aligned_span_width();
        if span_width != config.span_width {
            tracing::warn!(
                requested = config.span_width,
                aligned = span_width,
                cell = config.cell_size,
                "span width is not a whole number of cells; rounding up"
            );
        }

        let mut window = Self {
            generator,
            span_width,
            prefetch_margin: config.prefetch_margin,
            slots: [None, None, None],
            next_id: 0,
            stats: WorldStats::default(),
        };
        if !window.in_range(initial_x) {
            return Err(WorldError::OutOfRange {
                field: "initial_x",
                value: f64::from(initial_x),
                limit: window.viewpoint_limit(),
            });
        }
        let index = window.index_of(initial_x);
        window.slots[CURRENT] = Some(window.materialize(index, host)?);
        tracing::debug!(index, initial_x, "world window initialized");
        Ok(window)
    }

    /// Span index containing `x`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn index_of(&self, x: f32) -> i64 {
        (f64::from(x) / f64::from(self.span_width)).floor() as i64
    }

    /// Largest viewpoint magnitude the window follows: the spans on both
    /// sides of it still lie within [`WORLD_LIMIT`].
    #[must_use]
    pub fn viewpoint_limit(&self) -> f64 {
        f64::from(WORLD_LIMIT) - 2.0 * f64::from(self.span_width)
    }

    /// True if `x` is finite and within [`WorldWindow::viewpoint_limit`].
    #[must_use]
    pub fn in_range(&self, x: f32) -> bool {
        x.is_finite() && f64::from(x).abs() <= self.viewpoint_limit()
    }

    /// Chooses the transition for viewpoint `x` without changing anything.
    #[must_use]
    pub fn plan(&self, x: f32) -> Transition {
        if !self.in_range(x) {
            return Transition::Stay;
        }
        let target = self.index_of(x);
        let Some(current) = &self.slots[CURRENT] else {
            return Transition::Rebuild { index: target };
        };

        match target.saturating_sub(current.index) {
            0 => {
                if self.prefetch_margin > 0.0 {
                    let span = current.span;
                    if self.slots[BEHIND].is_none() && x - span.min_x() < self.prefetch_margin {
                        return Transition::Prefetch(Direction::Left);
                    }
                    if self.slots[AHEAD].is_none() && span.max_x() - x < self.prefetch_margin {
                        return Transition::Prefetch(Direction::Right);
                    }
                }
                Transition::Stay
            }
            1 => Transition::Step(Direction::Right),
            -1 => Transition::Step(Direction::Left),
            _ => Transition::Rebuild { index: target },
        }
    }

    /// Advances the window to viewpoint `x`, reporting every created and
    /// destroyed entity to `host`. Returns the structural transition taken.
    pub fn update<H: WorldHost + ?Sized>(&mut self, x: f32, host: &mut H) -> Transition {
        if !x.is_finite() {
            tracing::warn!(x, "ignoring non-finite viewpoint");
            return Transition::Stay;
        }
        if !self.in_range(x) {
            tracing::warn!(x, limit = self.viewpoint_limit(), "ignoring viewpoint beyond world limit");
            return Transition::Stay;
        }

        let transition = self.plan(x);
        self.apply(transition, host);

        // A step or rebuild can land inside the prefetch margin of the new
        // current span.
        if matches!(transition, Transition::Step(_) | Transition::Rebuild { .. }) {
            if let follow @ Transition::Prefetch(_) = self.plan(x) {
                self.apply(follow, host);
            }
        }
        transition
    }

    fn apply<H: WorldHost + ?Sized>(&mut self, transition: Transition, host: &mut H) {
        match transition {
            Transition::Stay => {}
            Transition::Prefetch(direction) => {
                let (slot, offset) = match direction {
                    Direction::Left => (BEHIND, -1),
                    Direction::Right => (AHEAD, 1),
                };
                if let Some(index) = self.current_index() {
                    self.fill(slot, index.saturating_add(offset), host);
                }
            }
            Transition::Step(direction) => {
                let Some(index) = self.current_index() else {
                    return;
                };
                let (near, far, offset) = match direction {
                    Direction::Right => (AHEAD, BEHIND, 1),
                    Direction::Left => (BEHIND, AHEAD, -1),
                };
                self.fill(near, index.saturating_add(offset), host);
                if let Some(stale) = self.slots[far].take() {
                    self.evict(stale, host);
                }
                match direction {
                    Direction::Right => self.slots.rotate_left(1),
                    Direction::Left => self.slots.rotate_right(1),
                }
                tracing::debug!(from = index, to = index.saturating_add(offset), "window stepped");
            }
            Transition::Rebuild { index } => {
                self.evict_all(host);
                self.fill(CURRENT, index, host);
                tracing::debug!(index, "window rebuilt");
            }
        }
    }

    /// Generates span `index` into `slot` if the slot is empty.
    fn fill<H: WorldHost + ?Sized>(&mut self, slot: usize, index: i64, host: &mut H) {
        if self.slots[slot].is_some() {
            return;
        }
        match self.materialize(index, host) {
            Ok(active) => self.slots[slot] = Some(active),
            Err(error) => tracing::warn!(index, %error, "span not generated"),
        }
    }

    /// Evicts every populated slot. The next [`WorldWindow::update`]
    /// rebuilds `CURRENT`.
    pub fn clear<H: WorldHost + ?Sized>(&mut self, host: &mut H) {
        self.evict_all(host);
        tracing::debug!(stats = ?self.stats, "world window cleared");
    }

    fn evict_all<H: WorldHost + ?Sized>(&mut self, host: &mut H) {
        let stale: Vec<ActiveSpan> = self.slots.iter_mut().filter_map(Option::take).collect();
        for span in stale {
            self.evict(span, host);
        }
    }

    fn evict<H: WorldHost + ?Sized>(&mut self, stale: ActiveSpan, host: &mut H) {
        self.stats.spans_evicted += 1;
        self.stats.entities_destroyed += stale.entities.len() as u64;
        for entity in &stale.entities {
            host.on_entity_destroyed(entity, entity.layer());
        }
        tracing::debug!(
            index = stale.index,
            entities = stale.entities.len(),
            "span evicted"
        );
    }

    fn materialize<H: WorldHost + ?Sized>(
        &mut self,
        index: i64,
        host: &mut H,
    ) -> WorldResult<ActiveSpan> {
        let span = WorldSpan::at_index(index, self.span_width)?;
        let region = self.generator.generate(span);
        let trees = region.trees.len();

        let entities: Vec<SpawnedEntity> = region
            .into_entities()
            .map(|entity| {
                let id = EntityId(self.next_id);
                self.next_id += 1;
                SpawnedEntity { id, entity }
            })
            .collect();
        for entity in &entities {
            host.on_entity_created(entity, entity.layer());
        }

        self.stats.spans_generated += 1;
        self.stats.entities_created += entities.len() as u64;
        tracing::debug!(
            index,
            min_x = span.min_x(),
            max_x = span.max_x(),
            trees,
            entities = entities.len(),
            "span generated"
        );

        Ok(ActiveSpan {
            index,
            span,
            entities,
        })
    }

    /// Ground surface height at `x`, for placing the avatar.
    #[must_use]
    pub fn ground_height_at(&self, x: f32) -> f32 {
        self.generator.height_field().height(x)
    }

    /// Index of `CURRENT`, if populated.
    #[must_use]
    pub fn current_index(&self) -> Option<i64> {
        self.slots[CURRENT].as_ref().map(ActiveSpan::index)
    }

    /// The span holding the viewpoint.
    #[must_use]
    pub fn current(&self) -> Option<&ActiveSpan> {
        self.slots[CURRENT].as_ref()
    }

    /// The span left of the viewpoint.
    #[must_use]
    pub fn behind(&self) -> Option<&ActiveSpan> {
        self.slots[BEHIND].as_ref()
    }

    /// The span right of the viewpoint.
    #[must_use]
    pub fn ahead(&self) -> Option<&ActiveSpan> {
        self.slots[AHEAD].as_ref()
    }

    /// Every populated slot, left to right.
    pub fn active_spans(&self) -> impl Iterator<Item = &ActiveSpan> {
        self.slots.iter().flatten()
    }

    /// Number of populated slots.
    #[must_use]
    pub fn populated(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Effective span width (whole cells).
    #[inline]
    #[must_use]
    pub fn span_width(&self) -> f32 {
        self.span_width
    }

    /// The generator.
    #[must_use]
    pub fn generator(&self) -> &RegionGenerator {
        &self.generator
    }

    /// Session counters.
    #[must_use]
    pub fn stats(&self) -> WorldStats {
        self.stats
    }
}
