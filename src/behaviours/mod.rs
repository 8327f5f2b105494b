//=========================================================================
// Behaviours
//=========================================================================
//
// Gameplay building blocks on top of the scene runtime.
//
// Each module is a leaf: behaviours meet only through capabilities looked
// up on an entity, never through each other's types.
//
//   mover          MovementInput        → Mover
//   mana           ManaUser             → ManaSpender
//   item           Item                 → ItemLogger
//   enemy          DamageReceiver       ← deal_damage
//   area_damage    AreaDamage component → DamageReceiver
//   bomb           AreaDamage           → Bomb
//   contact_event  collisions           → named event
//   timer          countdown            → named event
//
//=========================================================================

//=== Module Declarations =================================================

pub mod area_damage;
pub mod bomb;
pub mod contact_event;
pub mod enemy;
pub mod item;
pub mod mana;
pub mod mover;
pub mod timer;

//=== Public API ==========================================================

pub use area_damage::AreaDamage;
pub use bomb::{Bomb, BombConfig, BombState};
pub use contact_event::{ContactEvent, ContactEventConfig};
pub use enemy::{deal_damage, DamageOutcome, DamageReceiver, DamageToken, Enemy, EnemyConfig};
pub use item::{Item, ItemDetails, ItemLogger, Potion, Weapon};
pub use mana::{ManaError, ManaPolicy, ManaPool, ManaSpender, ManaUser};
pub use mover::{movement_delta, FixedInput, MovementInput, Mover, MoverConfig, PlayerInput};
pub use timer::{Timer, TimerConfig, TimerState};
