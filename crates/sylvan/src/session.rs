//! # Session
//!
//! One running world: the sliding window, the scene it feeds, and the
//! avatar-facing systems that react to it. The host calls [`Session::tick`]
//! once per frame with the viewpoint and frame time.

use sylvan_procedural::{Transition, WorldConfig, WorldStats, WorldWindow};

use crate::energy::Energy;
use crate::error::SessionResult;
use crate::events::{AvatarEvent, AvatarEvents};
use crate::harvest::FruitHarvest;
use crate::rain::RainCloud;
use crate::scene::SceneRegistry;

/// Energy a jump costs.
pub const JUMP_COST: f32 = 10.0;

/// Pending jumps the rain cloud can buffer between ticks.
const RAIN_QUEUE_CAPACITY: usize = 64;

/// Cloud top edge, camera space.
const CLOUD_Y: f32 = 10.0;

/// What happened during one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// Structural window change.
    pub transition: Transition,
    /// Entities destroyed by eviction.
    pub evicted: usize,
    /// Fruit that reappeared.
    pub respawned: usize,
    /// Raindrops that faded out.
    pub drops_faded: usize,
}

/// A running world session.
pub struct Session {
    config: WorldConfig,
    window: WorldWindow,
    scene: SceneRegistry,
    harvest: FruitHarvest,
    energy: Energy,
    events: AvatarEvents,
    rain: RainCloud,
    clock: f64,
    avatar: (f32, f32),
}

impl Session {
    /// Starts a session: generates the first span and stands the avatar on
    /// the ground at `avatar_start_x`.
    ///
    /// # Errors
    ///
    /// Any configuration error.
    pub fn new(config: WorldConfig) -> SessionResult<Self> {
        let mut scene = SceneRegistry::new(config.cell_size);
        let start_x = config.avatar_start_x;
        let window = WorldWindow::new(&config, start_x, &mut scene)?;
        let avatar = (start_x, window.ground_height_at(start_x));

        let mut events = AvatarEvents::new();
        let (_, rain_queue) = events.queue(RAIN_QUEUE_CAPACITY);
        let rain = RainCloud::new(config.seed, 0.0, CLOUD_Y, config.span_width, rain_queue);

        tracing::info!(
            seed = config.seed.value(),
            start_x,
            entities = scene.len(),
            "session started"
        );

        Ok(Self {
            config,
            window,
            scene,
            harvest: FruitHarvest::new(),
            energy: Energy::full(),
            events,
            rain,
            clock: 0.0,
            avatar,
        })
    }

    /// Advances one frame with the viewpoint at `viewpoint_x` and `dt`
    /// seconds elapsed.
    pub fn tick(&mut self, viewpoint_x: f32, dt: f32) -> TickReport {
        let transition = self.window.update(viewpoint_x, &mut self.scene);
        if viewpoint_x.is_finite() {
            self.avatar = (viewpoint_x, self.window.ground_height_at(viewpoint_x));
        }

        let evicted = self.scene.take_evicted();
        for id in &evicted {
            self.harvest.forget(*id);
        }

        self.clock += f64::from(dt.max(0.0));
        let respawned = self.harvest.advance(self.clock).len();
        let drops_faded = self.rain.update(dt.max(0.0));

        TickReport {
            transition,
            evicted: evicted.len(),
            respawned,
            drops_faded,
        }
    }

    /// The avatar jumps if it can pay [`JUMP_COST`]. Listeners hear about
    /// it immediately; the rain cloud on its next update.
    pub fn jump(&mut self) -> bool {
        if !self.energy.try_spend(JUMP_COST) {
            return false;
        }
        let (x, y) = self.avatar;
        self.events.emit(&AvatarEvent::Jumped { x, y });
        true
    }

    /// The avatar touches the point: a visible fruit there is picked.
    pub fn touch(&mut self, x: f32, y: f32) -> bool {
        let Some(fruit) = self.scene.fruit_at(x, y) else {
            return false;
        };
        let id = fruit.id;
        self.harvest.collect(id, &mut self.energy)
    }

    /// Evicts every span. The session can be ticked again afterwards.
    pub fn shutdown(&mut self) {
        self.window.clear(&mut self.scene);
        for id in self.scene.take_evicted() {
            self.harvest.forget(id);
        }
        tracing::info!(stats = ?self.window.stats(), clock = self.clock, "session shut down");
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The sliding window.
    #[must_use]
    pub fn window(&self) -> &WorldWindow {
        &self.window
    }

    /// Live entities.
    #[must_use]
    pub fn scene(&self) -> &SceneRegistry {
        &self.scene
    }

    /// Fruit schedule.
    #[must_use]
    pub fn harvest(&self) -> &FruitHarvest {
        &self.harvest
    }

    /// Avatar energy.
    #[must_use]
    pub fn energy(&self) -> Energy {
        self.energy
    }

    /// Avatar event listeners, for registering more.
    pub fn events_mut(&mut self) -> &mut AvatarEvents {
        &mut self.events
    }

    /// The rain cloud.
    #[must_use]
    pub fn rain(&self) -> &RainCloud {
        &self.rain
    }

    /// Avatar position: viewpoint x and ground height there.
    #[must_use]
    pub fn avatar(&self) -> (f32, f32) {
        self.avatar
    }

    /// Seconds of host time elapsed.
    #[must_use]
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Window counters.
    #[must_use]
    pub fn stats(&self) -> WorldStats {
        self.window.stats()
    }
}
