//=========================================================================
// Event Collector
//=========================================================================
//
// Host event collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<HostEvent> → collect_frame() → events (this tick) → TickControl
//
// Bounded polling prevents one flooded tick from starving the simulation;
// the remainder is picked up on the following ticks.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::HostEvent;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects host events with bounded polling.
pub(crate) struct EventCollector {
    receiver: Receiver<HostEvent>,
    events: Vec<HostEvent>,
    max_events_per_tick: usize,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<HostEvent>, max_events_per_tick: usize) -> Self {
        Self {
            receiver,
            events: Vec::with_capacity(16),
            max_events_per_tick,
        }
    }

    /// Collects pending host events for this tick.
    ///
    /// Returns [`TickControl::Exit`] on `Shutdown` or when every sender is
    /// gone. Events already collected this tick are kept in both cases.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.events.clear();
        let mut drained = 0;

        while drained < self.max_events_per_tick {
            match self.receiver.try_recv() {
                Ok(HostEvent::Shutdown) => {
                    info!("Shutdown requested by host");
                    return TickControl::Exit;
                }
                Ok(event) => {
                    self.events.push(event);
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => {
                    info!("All host handles dropped");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= self.max_events_per_tick {
            warn!("Host event backlog: deferred events after draining {} this tick", drained);
        }

        TickControl::Continue
    }

    /// Takes ownership of this tick's events, leaving the buffer empty.
    pub(crate) fn take_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    #[cfg(test)]
    pub(crate) fn events(&self) -> &[HostEvent] {
        &self.events
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
