//=========================================================================
// Scene System
//=========================================================================
//
// Runs behaviours attached to entities.
//
// Architecture:
//   Scene
//     ├─ world: World                       (entities + capabilities)
//     ├─ behaviours: HashMap<EntityId, Vec<Box<dyn Behaviour>>>
//     ├─ scheduler: Scheduler               (deferred callbacks)
//     ├─ events: EventHub                   (named notifications)
//     ├─ input: InputState
//     └─ console: Console
//
// Flow:
//   tick() → on_start / update / on_timer → Behaviour hooks (with Context)
//
//=========================================================================

//=== Module Declarations =================================================

mod behaviour;
mod builder;
mod runtime;

//=== Public API ==========================================================

pub use behaviour::{AsAny, Behaviour, Contact, ContactKind, Context};
pub use builder::EntityBuilder;
pub use runtime::Scene;
