//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use scene_behaviours::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder};

// Runtime
pub use crate::core::host::{HostError, HostEvent, HostHandle, TickControl};
pub use crate::core::input::{Axis, InputEvent, InputState, KeyCode};
pub use crate::core::scene::{Behaviour, Contact, ContactKind, Context, EntityBuilder, Scene};
pub use crate::core::scheduler::TimerHandle;
pub use crate::core::world::{EntityId, Layer, LayerMask, World};

// Behaviours
pub use crate::behaviours::{
    AreaDamage, Bomb, BombConfig, ContactEvent, ContactEventConfig, DamageReceiver, Enemy,
    EnemyConfig, Item, ItemDetails, ItemLogger, ManaPolicy, ManaPool, ManaSpender, ManaUser,
    MovementInput, Mover, MoverConfig, PlayerInput, Timer, TimerConfig,
};
