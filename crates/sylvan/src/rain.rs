//! # Rain Cloud
//!
//! A block cloud drifting across the screen that rains whenever the avatar
//! jumps. Positions are in camera space.
//!
//! Which blocks drop rain on a jump is decided by a seeded placer stream
//! keyed on the jump number and block index, so a replayed session rains
//! the same way.

use sylvan_procedural::{Purpose, Rect, SeededPlacer, WorldSeed};

use crate::events::{AvatarEvent, EventReceiver};

/// Cloud shape, row by row. `true` is a block.
const PATTERN: [[bool; 6]; 6] = {
    const O: bool = false;
    const X: bool = true;
    [
        [O, X, X, O, O, O],
        [X, X, X, O, X, O],
        [X, X, X, X, X, X],
        [X, X, X, X, X, X],
        [O, X, X, X, O, O],
        [O, O, O, O, O, O],
    ]
};

/// Cloud block edge length.
pub const BLOCK_SIZE: f32 = 30.0;

/// Raindrop edge length.
pub const DROP_SIZE: f32 = 8.0;

/// Probability that a block drops rain on a jump.
pub const DROP_CHANCE: f64 = 0.4;

/// Downward acceleration of a raindrop.
pub const DROP_GRAVITY: f32 = 140.0;

/// Seconds for a raindrop to fade out.
pub const DROP_FADE_SECS: f32 = 3.0;

/// Blocks the cloud starts left of its origin.
const DRIFT_LEAD_BLOCKS: f32 = 7.0;

/// One drift loop takes `(screen_width + BLOCK_SIZE) / DRIFT_PACE` seconds.
const DRIFT_PACE: f32 = 25.0;

/// A falling raindrop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Raindrop {
    /// Top-left x.
    pub x: f32,
    /// Top-left y.
    pub y: f32,
    /// Vertical speed.
    pub velocity_y: f32,
    /// Seconds since spawn.
    pub age: f32,
}

impl Raindrop {
    /// Camera-space bounds.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, DROP_SIZE, DROP_SIZE)
    }

    /// Opacity, 1 at spawn falling to 0 at [`DROP_FADE_SECS`].
    #[must_use]
    pub fn opacity(&self) -> f32 {
        let t = (self.age / DROP_FADE_SECS).clamp(0.0, 1.0);
        1.0 - t * t * t
    }
}

/// The cloud and the rain it has dropped.
pub struct RainCloud {
    placer: SeededPlacer,
    events: EventReceiver,
    origin_x: f32,
    origin_y: f32,
    screen_width: f32,
    elapsed: f32,
    jumps: u64,
    drops: Vec<Raindrop>,
}

impl RainCloud {
    /// Creates a cloud with its pattern's top-left corner at the origin,
    /// fed by a queue of avatar events.
    #[must_use]
    pub fn new(seed: WorldSeed, origin_x: f32, origin_y: f32, screen_width: f32, events: EventReceiver) -> Self {
        Self {
            placer: SeededPlacer::new(seed),
            events,
            origin_x,
            origin_y,
            screen_width,
            elapsed: 0.0,
            jumps: 0,
            drops: Vec::new(),
        }
    }

    /// Horizontal offset of the cloud at the current drift time.
    fn drift(&self) -> f32 {
        let lead = BLOCK_SIZE * DRIFT_LEAD_BLOCKS;
        let distance = self.screen_width + lead;
        let period = (self.screen_width + BLOCK_SIZE) / DRIFT_PACE;
        let progress = (self.elapsed / period).fract();
        progress * distance - lead
    }

    /// Top-left corners of the cloud blocks, row by row.
    #[allow(clippy::cast_precision_loss)]
    pub fn blocks(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        let x0 = self.origin_x + self.drift();
        PATTERN.iter().enumerate().flat_map(move |(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, &solid)| solid)
                .map(move |(col, _)| {
                    (
                        x0 + col as f32 * BLOCK_SIZE,
                        self.origin_y + row as f32 * BLOCK_SIZE,
                    )
                })
        })
    }

    /// Live raindrops.
    #[must_use]
    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }

    /// Jumps seen so far.
    #[must_use]
    pub fn jumps(&self) -> u64 {
        self.jumps
    }

    /// Spawns rain for one jump.
    #[allow(clippy::cast_possible_wrap)]
    fn rain(&mut self) {
        let jump = self.jumps as i64;
        self.jumps += 1;

        let spawned: Vec<Raindrop> = self
            .blocks()
            .enumerate()
            .filter(|(block, _)| {
                self.placer
                    .stream(Purpose::Rain, &[jump, *block as i64])
                    .chance(DROP_CHANCE)
            })
            .map(|(_, (x, y))| Raindrop {
                x,
                y,
                velocity_y: 0.0,
                age: 0.0,
            })
            .collect();
        tracing::trace!(jump, drops = spawned.len(), "rain");
        self.drops.extend(spawned);
    }

    /// Advances drift and drops by `dt` seconds, spawning rain for every
    /// jump queued since the last update. Returns the drops that faded out.
    pub fn update(&mut self, dt: f32) -> usize {
        for event in self.events.drain() {
            match event {
                AvatarEvent::Jumped { .. } => self.rain(),
            }
        }

        self.elapsed += dt;
        for drop in &mut self.drops {
            drop.velocity_y += DROP_GRAVITY * dt;
            drop.y += drop.velocity_y * dt;
            drop.age += dt;
        }
        let before = self.drops.len();
        self.drops.retain(|d| d.age < DROP_FADE_SECS);
        before - self.drops.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::AvatarEvents;

    const JUMP: AvatarEvent = AvatarEvent::Jumped { x: 0.0, y: 0.0 };

    fn cloud(seed: u64) -> (AvatarEvents, RainCloud) {
        let mut events = AvatarEvents::new();
        let (_, rx) = events.queue(16);
        (events, RainCloud::new(WorldSeed::new(seed), 100.0, 50.0, 1000.0, rx))
    }

    #[test]
    fn test_pattern_block_count() {
        let (_, cloud) = cloud(1);
        assert_eq!(cloud.blocks().count(), 21);
    }

    #[test]
    fn test_jump_makes_rain() {
        let (mut events, mut cloud) = cloud(10);
        for _ in 0..5 {
            events.emit(&JUMP);
        }
        cloud.update(0.0);
        assert_eq!(cloud.jumps(), 5);
        // 105 trials at 40%.
        let n = cloud.drops().len();
        assert!((20..=70).contains(&n), "unexpected drop count {n}");
    }

    #[test]
    fn test_rain_is_reproducible() {
        let (mut ea, mut a) = cloud(3);
        let (mut eb, mut b) = cloud(3);
        ea.emit(&JUMP);
        eb.emit(&JUMP);
        a.update(0.0);
        b.update(0.0);
        assert_eq!(a.drops(), b.drops());
    }

    #[test]
    fn test_drops_fall_and_fade() {
        let (mut events, mut cloud) = cloud(10);
        while cloud.drops().is_empty() {
            events.emit(&JUMP);
            cloud.update(0.0);
        }
        let start = cloud.drops()[0];
        assert_eq!(start.opacity(), 1.0);
        assert_eq!(start.bounds().width, DROP_SIZE);

        cloud.update(1.0);
        let later = cloud.drops()[0];
        assert!(later.y > start.y);
        assert!(later.opacity() < 1.0 && later.opacity() > 0.0);

        let faded = cloud.update(2.5);
        assert!(faded > 0);
        assert!(cloud.drops().is_empty());
    }

    #[test]
    fn test_cloud_drifts() {
        let (_, mut cloud) = cloud(1);
        let before: Vec<_> = cloud.blocks().collect();
        cloud.update(2.0);
        let after: Vec<_> = cloud.blocks().collect();
        assert!(after[0].0 > before[0].0);
        assert_eq!(after[0].1, before[0].1);
    }
}
