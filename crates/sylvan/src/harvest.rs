//! # Fruit Harvest
//!
//! Touching a visible fruit grants energy once, hides the fruit and
//! schedules it to reappear. The schedule runs on the host clock passed to
//! [`FruitHarvest::advance`].
//!
//! Regenerated spans hand out fresh entity ids, so a fruit picked before
//! its span was evicted comes back visible.

use std::collections::HashMap;

use sylvan_procedural::EntityId;

use crate::energy::EnergySink;

/// Energy granted per fruit.
pub const FRUIT_ENERGY: f32 = 10.0;

/// Seconds a picked fruit stays hidden.
pub const FRUIT_RESPAWN_SECS: f64 = 30.0;

/// Hidden fruit and when each reappears.
#[derive(Debug, Default)]
pub struct FruitHarvest {
    now: f64,
    hidden: HashMap<EntityId, f64>,
}

impl FruitHarvest {
    /// Creates an empty schedule at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current host time in seconds.
    #[inline]
    #[must_use]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// True unless the fruit was picked and has not respawned yet.
    #[must_use]
    pub fn is_visible(&self, fruit: EntityId) -> bool {
        !self.hidden.contains_key(&fruit)
    }

    /// Number of hidden fruit.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }

    /// Picks a fruit. Returns false (and grants nothing) if it is hidden.
    pub fn collect<S: EnergySink + ?Sized>(&mut self, fruit: EntityId, sink: &mut S) -> bool {
        if !self.is_visible(fruit) {
            return false;
        }
        sink.grant(FRUIT_ENERGY);
        self.hidden.insert(fruit, self.now + FRUIT_RESPAWN_SECS);
        tracing::debug!(id = fruit.0, respawn_at = self.now + FRUIT_RESPAWN_SECS, "fruit picked");
        true
    }

    /// Moves the clock to `now` and returns the fruit that reappeared.
    /// A clock that goes backwards is ignored.
    pub fn advance(&mut self, now: f64) -> Vec<EntityId> {
        if now > self.now {
            self.now = now;
        }
        let due: Vec<EntityId> = self
            .hidden
            .iter()
            .filter(|(_, &at)| at <= self.now)
            .map(|(&id, _)| id)
            .collect();
        for id in &due {
            self.hidden.remove(id);
        }
        due
    }

    /// Drops a fruit from the schedule, e.g. when its span is evicted.
    pub fn forget(&mut self, fruit: EntityId) {
        self.hidden.remove(&fruit);
    }
}
