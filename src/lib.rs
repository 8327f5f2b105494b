//=========================================================================
// Scene Behaviours Library Root
//
// Small gameplay behaviours (movement, mana, items, area damage, bombs,
// contact events, enemy health, timers) running on a deterministic,
// single-threaded scene runtime.
//
// Typical usage:
// ```no_run
// use scene_behaviours::prelude::*;
//
// let engine = EngineBuilder::new().build().init(|scene| {
//     scene.spawn(
//         EntityBuilder::new("Player")
//             .with_capability::<dyn MovementInput>(Box::new(PlayerInput))
//             .with_behaviour(Mover::default()),
//     );
// });
// let host = engine.host();
// let running = engine.spawn();
// host.shutdown().ok();
// let _scene = running.join();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the runtime (world, scene, scheduler, events, input, host
// bridge). `behaviours` holds the gameplay components built on it.
//
pub mod behaviours;
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------

mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
