//=========================================================================
// Scene Runtime
//=========================================================================
//
// Owns the world and every scene resource, and drives behaviour hooks.
//
// Tick pipeline:
//   1. Lifecycle follow-up for entities destroyed outside a callback
//   2. on_start for entities spawned since the last tick
//   3. update for every entity, in spawn order
//   4. Advance the scheduler, on_timer for every due timer
//
// Destruction:
//   World::destroy removes the entity at once. Right after the running
//   callback returns, the scene cancels the entity's timers and calls
//   on_destroy on its behaviours. A timer can therefore never reach a
//   destroyed entity.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::time::Duration;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{Behaviour, Contact, ContactKind, Context, EntityBuilder};
use crate::core::console::Console;
use crate::core::events::EventHub;
use crate::core::input::InputState;
use crate::core::scheduler::Scheduler;
use crate::core::world::{EntityId, World};

//=== Scene ===============================================================

/// A world of entities plus the runtime that animates them.
pub struct Scene {
    world: World,
    behaviours: HashMap<EntityId, Vec<Box<dyn Behaviour>>>,
    order: Vec<EntityId>,
    pending_start: Vec<EntityId>,
    scheduler: Scheduler,
    events: EventHub,
    input: InputState,
    console: Console,
    delta: Duration,
}

impl Scene {
    //--- Construction -----------------------------------------------------

    /// Creates an empty scene with default input bindings.
    pub fn new() -> Self {
        Self {
            world: World::new(),
            behaviours: HashMap::new(),
            order: Vec::new(),
            pending_start: Vec::new(),
            scheduler: Scheduler::new(),
            events: EventHub::new(),
            input: InputState::new(),
            console: Console::new(),
            delta: Duration::ZERO,
        }
    }

    //--- Entity Lifecycle -------------------------------------------------

    /// Adds an entity to the world. Its behaviours start on the next tick.
    pub fn spawn(&mut self, builder: EntityBuilder) -> EntityId {
        let EntityBuilder {
            name,
            transform,
            layer,
            capabilities,
            behaviours,
        } = builder;

        let id = self.world.spawn_with(name, transform, layer, capabilities);

        if !behaviours.is_empty() {
            debug!("Entity {} spawned with {} behaviour(s)", id, behaviours.len());
            self.behaviours.insert(id, behaviours);
            self.order.push(id);
            self.pending_start.push(id);
        }

        id
    }

    /// Destroys an entity and runs its destruction hooks.
    ///
    /// Returns `false` if the entity was already gone.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        let destroyed = self.world.destroy(id);
        self.flush_destroyed();
        destroyed
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the scene by one tick of length `delta`.
    pub fn tick(&mut self, delta: Duration) {
        self.delta = delta;
        self.flush_destroyed();

        // 1. Start newly spawned entities
        for id in std::mem::take(&mut self.pending_start) {
            self.dispatch(id, |behaviour, ctx| behaviour.on_start(ctx));
        }

        // 2. Per-tick update
        let order = self.order.clone();
        for id in order {
            self.dispatch(id, |behaviour, ctx| behaviour.update(ctx));
        }

        // 3. Deferred callbacks (those scheduled during the drain wait a tick)
        self.scheduler.advance(delta);
        let horizon = self.scheduler.horizon();
        while let Some(expired) = self.scheduler.pop_due_before(horizon) {
            self.dispatch(expired.owner, |behaviour, ctx| {
                behaviour.on_timer(ctx, expired.handle)
            });
        }
    }

    //--- Host Notifications -----------------------------------------------

    /// Notifies both entities of a contact.
    ///
    /// `a` is notified first. Returns `false` (and notifies nobody) if
    /// either entity is already gone.
    pub fn apply_contact(&mut self, a: EntityId, b: EntityId, kind: ContactKind) -> bool {
        let (Some(layer_a), Some(layer_b)) = (self.world.layer(a), self.world.layer(b)) else {
            warn!("Ignoring {:?} contact between {} and {}: entity gone", kind, a, b);
            return false;
        };

        let seen_by_a = Contact { other: b, other_layer: layer_b, kind };
        let seen_by_b = Contact { other: a, other_layer: layer_a, kind };

        self.dispatch(a, |behaviour, ctx| behaviour.on_contact(ctx, &seen_by_a));
        self.dispatch(b, |behaviour, ctx| behaviour.on_contact(ctx, &seen_by_b));
        true
    }

    /// Explicitly triggers an entity (e.g. early detonation).
    pub fn trigger(&mut self, id: EntityId) -> bool {
        if !self.world.contains(id) {
            warn!("Ignoring trigger for unknown entity {}", id);
            return false;
        }

        self.dispatch(id, |behaviour, ctx| behaviour.on_trigger(ctx));
        true
    }

    //--- Behaviour Access -------------------------------------------------

    /// Returns the first behaviour of type `B` on an entity.
    pub fn behaviour<B: Behaviour>(&self, id: EntityId) -> Option<&B> {
        self.behaviours
            .get(&id)?
            .iter()
            .find_map(|behaviour| (**behaviour).as_any().downcast_ref::<B>())
    }

    /// Runs `f` on the first behaviour of type `B` on an entity, with a
    /// callback context for that entity.
    ///
    /// Returns `None` if the entity is gone or has no such behaviour.
    pub fn with_behaviour<B, R, F>(&mut self, id: EntityId, f: F) -> Option<R>
    where
        B: Behaviour,
        F: FnOnce(&mut B, &mut Context<'_>) -> R,
    {
        if !self.world.contains(id) {
            return None;
        }
        let mut list = self.behaviours.remove(&id)?;

        let result = {
            let mut ctx = self.context(id);
            list.iter_mut()
                .find_map(|behaviour| (**behaviour).as_any_mut().downcast_mut::<B>())
                .map(|behaviour| f(behaviour, &mut ctx))
        };

        self.behaviours.insert(id, list);
        self.flush_destroyed();
        result
    }

    //--- Resources --------------------------------------------------------

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access. Entities destroyed through it get their
    /// destruction hooks at the next tick or scene call.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn events(&self) -> &EventHub {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventHub {
        &mut self.events
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Scene clock: total time advanced by `tick`.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    //--- Internal Helpers -------------------------------------------------

    fn context(&mut self, entity: EntityId) -> Context<'_> {
        Context {
            entity,
            world: &mut self.world,
            scheduler: &mut self.scheduler,
            events: &mut self.events,
            input: &self.input,
            console: &mut self.console,
            delta: self.delta,
        }
    }

    /// Runs `callback` on each behaviour of a live entity.
    ///
    /// Stops early if a behaviour destroys its own entity.
    fn dispatch<F>(&mut self, id: EntityId, mut callback: F)
    where
        F: FnMut(&mut dyn Behaviour, &mut Context<'_>),
    {
        if !self.world.contains(id) {
            return;
        }
        let Some(mut list) = self.behaviours.remove(&id) else {
            return;
        };

        {
            let mut ctx = self.context(id);
            for behaviour in list.iter_mut() {
                if !ctx.is_alive() {
                    break;
                }
                callback(&mut **behaviour, &mut ctx);
            }
        }

        self.behaviours.insert(id, list);
        self.flush_destroyed();
    }

    /// Cancels timers and runs on_destroy for every entity destroyed since
    /// the last flush, including entities destroyed by those hooks.
    fn flush_destroyed(&mut self) {
        loop {
            let destroyed = self.world.take_destroyed();
            if destroyed.is_empty() {
                break;
            }

            for id in destroyed {
                self.scheduler.cancel_owned_by(id);
                self.order.retain(|&entity| entity != id);
                self.pending_start.retain(|&entity| entity != id);

                let Some(mut list) = self.behaviours.remove(&id) else {
                    continue;
                };

                info!("Running destroy hooks for entity {}", id);
                let mut ctx = self.context(id);
                for behaviour in list.iter_mut() {
                    behaviour.on_destroy(&mut ctx);
                }
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
