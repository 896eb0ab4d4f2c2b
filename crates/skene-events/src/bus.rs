#![forbid(unsafe_code)]

use tokio::sync::broadcast;

use crate::Event;

/// Shared fan-out channel for everything the playback surface emits.
///
/// The session hands a clone to every publisher; each subscriber sees the
/// full interleaved stream from the moment it subscribed. Publishing never
/// awaits: without subscribers the event is dropped, and a subscriber that
/// falls more than `capacity` events behind observes
/// [`broadcast::error::RecvError::Lagged`] instead of stalling the sender.
#[derive(Clone, Debug)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Fan an event out to every current subscriber.
    ///
    /// Takes anything `Into<Event>`, so sub-enum values go in directly:
    /// `bus.publish(OverlayEvent::Deleted { id })`.
    pub fn publish<E: Into<Event>>(&self, event: E) {
        let _ = self.tx.send(event.into());
    }

    /// Open an independent receiver over all events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
