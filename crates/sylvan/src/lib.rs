//! # SYLVAN
//!
//! Session host for the streamed procedural world.
//!
//! ## Components
//!
//! - `SceneRegistry`: the [`WorldHost`](sylvan_procedural::WorldHost) that holds live entities per layer
//! - `FruitHarvest` + `Energy`: fruit grants energy once, hides, respawns
//! - `AvatarEvents`: jump notifications, as callbacks or a bounded queue
//! - `RainCloud`: rains on every jump
//! - `Session`: ties the above to a `WorldWindow` and a frame clock

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod energy;
pub mod error;
pub mod events;
pub mod harvest;
pub mod rain;
pub mod scene;
pub mod session;

pub use energy::{Energy, EnergySink, MAX_ENERGY};
pub use error::{SessionError, SessionResult};
pub use events::{AvatarEvent, AvatarEvents, EventReceiver, EventSender, ListenerId};
pub use harvest::{FruitHarvest, FRUIT_ENERGY, FRUIT_RESPAWN_SECS};
pub use rain::{RainCloud, Raindrop, DROP_CHANCE};
pub use scene::SceneRegistry;
pub use session::{Session, TickReport, JUMP_COST};
