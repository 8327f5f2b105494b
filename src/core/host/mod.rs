//=========================================================================
// Host Bridge
//=========================================================================
//
// Bridges whatever drives the simulation (window layer, physics backend,
// test harness) with the engine thread.
//
// Components:
// - `interface`: Event types, sender handle and errors (the contract)
// - `event_collector`: Engine-side bounded draining of the event queue
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub use event_collector::TickControl;
pub use interface::{HostError, HostEvent, HostHandle};

//=== Internal API ========================================================

pub(crate) use event_collector::EventCollector;
