//=========================================================================
// Core Systems
//=========================================================================
//
// Everything that runs on the simulation thread.
//
// Layout:
//   world      entities, transforms, layers, capability lookup
//   scene      behaviour runtime (lifecycle hooks, dispatch)
//   scheduler  virtual clock and cancelable deferred callbacks
//   events     named zero-argument notifications
//   input      held keys and movement axes
//   console    text sink for in-game presentation
//   host       channel bridge from host threads to the engine
//
//=========================================================================

//=== Module Declarations =================================================

pub mod console;
pub mod events;
pub mod host;
pub mod input;
pub mod scene;
pub mod scheduler;
pub mod world;

//=== Public API ==========================================================

pub use console::Console;
pub use events::EventHub;
pub use host::{HostError, HostEvent, HostHandle, TickControl};
pub use input::{Axis, AxisBinding, InputEvent, InputState, KeyCode};
pub use scene::{Behaviour, Contact, ContactKind, Context, EntityBuilder, Scene};
pub use scheduler::{Scheduler, TimerHandle};
pub use world::{EntityId, Layer, LayerMask, Transform, World, WorldError};
