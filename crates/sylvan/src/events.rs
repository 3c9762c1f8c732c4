//! # Avatar Events
//!
//! Things the avatar does that the world reacts to.
//!
//! ```text
//! ┌─────────────┐  emit   ┌──────────────┐  callback  ┌─────────────┐
//! │   Avatar    │────────>│ AvatarEvents │───────────>│  listener   │
//! └─────────────┘         └──────┬───────┘            └─────────────┘
//!                                │ queue()
//!                                v
//!                         ┌──────────────┐   drain    ┌─────────────┐
//!                         │   channel    │───────────>│  RainCloud  │
//!                         └──────────────┘            └─────────────┘
//! ```
//!
//! Listeners are plain callbacks run in registration order. Consumers that
//! want to react on their own tick take a bounded queue instead.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Events emitted by the avatar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AvatarEvent {
    /// The avatar left the ground.
    Jumped {
        /// Avatar x.
        x: f32,
        /// Avatar y (top edge).
        y: f32,
    },
}

/// Handle returned by [`AvatarEvents::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&AvatarEvent)>;

/// Registered listeners.
#[derive(Default)]
pub struct AvatarEvents {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl AvatarEvents {
    /// Creates an empty listener list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listener; it runs after every listener registered before it.
    pub fn register<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&AvatarEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Registers a listener that forwards into a bounded queue.
    ///
    /// When the queue is full new events are dropped.
    pub fn queue(&mut self, capacity: usize) -> (ListenerId, EventReceiver) {
        let (sender, receiver) = bounded(capacity);
        let sender = EventSender { sender };
        let id = self.register(move |event| {
            sender.send(*event);
        });
        (id, EventReceiver { receiver })
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Delivers `event` to every listener.
    pub fn emit(&mut self, event: &AvatarEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// True when no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Sending half of an event queue.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<AvatarEvent>,
}

impl EventSender {
    /// Sends without blocking. Returns false if the event was dropped.
    #[inline]
    pub fn send(&self, event: AvatarEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!(?event, "avatar event queue full; event dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Receiving half of an event queue.
pub struct EventReceiver {
    receiver: Receiver<AvatarEvent>,
}

impl EventReceiver {
    /// Takes every pending event.
    pub fn drain(&self) -> Vec<AvatarEvent> {
        self.receiver.try_iter().collect()
    }

    /// Number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}
