//=========================================================================
// Behaviour Trait & Callback Context
//=========================================================================
//
// Behaviours are the units of gameplay logic attached to entities. The
// scene calls their lifecycle hooks and hands them a `Context` that
// borrows every scene resource they may touch.
//
// Lifecycle:
//   spawn → on_start (next tick) → update (every tick) ─┐
//                ↑                                       ├─→ on_destroy
//        on_timer / on_contact / on_trigger (as they happen)┘
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::time::Duration;

use glam::Vec3;

//=== Internal Dependencies ===============================================

use crate::core::console::Console;
use crate::core::events::EventHub;
use crate::core::input::InputState;
use crate::core::scheduler::{Scheduler, TimerHandle};
use crate::core::world::{EntityId, Layer, World};

//=== AsAny ===============================================================

/// Upcast helper so the scene can hand out concrete behaviour types.
///
/// Implemented automatically for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=== Contact =============================================================

/// How two entities touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactKind {
    /// Overlap with a trigger volume (no physical response).
    Trigger,

    /// Physical collision.
    Collision,
}

/// One side of a contact, as seen by the receiving entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    /// The entity that was touched.
    pub other: EntityId,

    /// Layer of `other` at the moment of contact.
    pub other_layer: Layer,

    pub kind: ContactKind,
}

//=== Behaviour Trait =====================================================

/// Gameplay logic attached to an entity.
///
/// Every hook has an empty default, so a behaviour only implements the
/// callbacks it reacts to.
///
/// ```ignore
/// struct Spinner;
///
/// impl Behaviour for Spinner {
///     fn update(&mut self, ctx: &mut Context) {
///         let step = Vec3::X * ctx.delta_seconds();
///         if let Some(transform) = ctx.world.transform_mut(ctx.entity) {
///             transform.translate(step);
///         }
///     }
/// }
/// ```
pub trait Behaviour: AsAny + Send {
    /// Called once, at the start of the first tick after the entity spawned.
    fn on_start(&mut self, _ctx: &mut Context<'_>) {}

    /// Called every tick while the entity is alive.
    fn update(&mut self, _ctx: &mut Context<'_>) {}

    /// Called when a timer scheduled for this entity comes due.
    fn on_timer(&mut self, _ctx: &mut Context<'_>, _timer: TimerHandle) {}

    /// Called when the host reports a contact involving this entity.
    fn on_contact(&mut self, _ctx: &mut Context<'_>, _contact: &Contact) {}

    /// Called when the host explicitly triggers this entity.
    fn on_trigger(&mut self, _ctx: &mut Context<'_>) {}

    /// Called after the entity has been removed from the world.
    ///
    /// `ctx.entity` is already dead: world queries on it return `None`.
    fn on_destroy(&mut self, _ctx: &mut Context<'_>) {}
}

//=== Context =============================================================

/// Scene resources lent to a behaviour for the duration of one callback.
pub struct Context<'a> {
    /// Entity the running behaviour is attached to.
    pub entity: EntityId,
    pub world: &'a mut World,
    pub scheduler: &'a mut Scheduler,
    pub events: &'a mut EventHub,
    pub input: &'a InputState,
    pub console: &'a mut Console,
    /// Elapsed time of the current tick.
    pub delta: Duration,
}

impl Context<'_> {
    /// Elapsed time of the current tick, in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Returns `false` once the entity has been destroyed.
    pub fn is_alive(&self) -> bool {
        self.world.contains(self.entity)
    }

    pub fn position(&self) -> Option<Vec3> {
        self.world.position(self.entity)
    }

    /// Schedules `on_timer` for this entity after `delay`.
    pub fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.scheduler.schedule(self.entity, delay)
    }

    pub fn cancel(&mut self, timer: TimerHandle) -> bool {
        self.scheduler.cancel(timer)
    }

    /// Fires a named event. See [`EventHub::fire`].
    pub fn fire(&mut self, event: &str) -> usize {
        self.events.fire(event)
    }

    /// Destroys the entity this behaviour is attached to.
    pub fn destroy_self(&mut self) -> bool {
        self.world.destroy(self.entity)
    }
}
