//=========================================================================
// Host Bridge Interface
//=========================================================================
//
// Host-to-engine interface types (events, handle and errors).
//
// Defines the contract between whatever drives the simulation (window
// layer, physics backend, network, tests) and the engine thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use crossbeam_channel::{Sender, TrySendError};

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::scene::ContactKind;
use crate::core::world::EntityId;

//=== HostEvent ===========================================================

/// Notifications sent from the host to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Raw input collected by the host since its last send.
    Input(Vec<InputEvent>),

    /// Two entities touched.
    Contact {
        a: EntityId,
        b: EntityId,
        kind: ContactKind,
    },

    /// Explicit trigger of an entity (early detonation and the like).
    Trigger(EntityId),

    /// Removal of an entity by the host.
    Destroy(EntityId),

    /// Stop the engine loop.
    Shutdown,
}

//=== HostError ===========================================================

/// Failure to deliver a [`HostEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostError {
    /// The engine queue is full; the event was dropped.
    Full,

    /// The engine has stopped.
    Disconnected,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "Engine event queue is full"),
            Self::Disconnected => write!(f, "Engine is no longer running"),
        }
    }
}

impl std::error::Error for HostError {}

impl<T> From<TrySendError<T>> for HostError {
    fn from(error: TrySendError<T>) -> Self {
        match error {
            TrySendError::Full(_) => Self::Full,
            TrySendError::Disconnected(_) => Self::Disconnected,
        }
    }
}

//=== HostHandle ==========================================================

/// Cloneable sender side of the engine's event queue.
///
/// Sends never block: a full queue is reported as [`HostError::Full`], so
/// a handle can also be used from event listeners running on the engine
/// thread itself.
#[derive(Debug, Clone)]
pub struct HostHandle {
    sender: Sender<HostEvent>,
}

impl HostHandle {
    pub(crate) fn new(sender: Sender<HostEvent>) -> Self {
        Self { sender }
    }

    /// Sends any host event.
    pub fn send(&self, event: HostEvent) -> Result<(), HostError> {
        self.sender.try_send(event).map_err(HostError::from)
    }

    pub fn input(&self, events: Vec<InputEvent>) -> Result<(), HostError> {
        self.send(HostEvent::Input(events))
    }

    pub fn contact(&self, a: EntityId, b: EntityId, kind: ContactKind) -> Result<(), HostError> {
        self.send(HostEvent::Contact { a, b, kind })
    }

    pub fn trigger(&self, id: EntityId) -> Result<(), HostError> {
        self.send(HostEvent::Trigger(id))
    }

    pub fn destroy(&self, id: EntityId) -> Result<(), HostError> {
        self.send(HostEvent::Destroy(id))
    }

    pub fn shutdown(&self) -> Result<(), HostError> {
        self.send(HostEvent::Shutdown)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crossbeam_channel::bounded;

    #[test]
    fn handle_delivers_events_in_order() {
        let (tx, rx) = bounded(4);
        let handle = HostHandle::new(tx);

        handle.input(vec![InputEvent::KeyDown(KeyCode::KeyW)]).unwrap();
        handle.shutdown().unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            HostEvent::Input(vec![InputEvent::KeyDown(KeyCode::KeyW)])
        );
        assert_eq!(rx.try_recv().unwrap(), HostEvent::Shutdown);
    }

    #[test]
    fn full_queue_is_reported() {
        let (tx, _rx) = bounded(1);
        let handle = HostHandle::new(tx);

        assert_eq!(handle.shutdown(), Ok(()));
        assert_eq!(handle.shutdown(), Err(HostError::Full));
    }

    #[test]
    fn dropped_receiver_is_reported() {
        let (tx, rx) = bounded(1);
        let handle = HostHandle::new(tx);
        drop(rx);

        assert_eq!(handle.shutdown(), Err(HostError::Disconnected));
    }

    #[test]
    fn error_messages() {
        assert!(HostError::Full.to_string().contains("full"));
        assert!(HostError::Disconnected.to_string().contains("no longer"));
    }
}
