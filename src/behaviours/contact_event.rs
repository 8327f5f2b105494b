//=========================================================================
// Contact Event
//=========================================================================
//
// Fires a named event when the entity collides with something on a
// configured layer. Stateless.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::scene::{Behaviour, Contact, ContactKind, Context};
use crate::core::world::LayerMask;

//=== ContactEventConfig ==================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEventConfig {
    /// Layers whose collisions fire the event. Empty by default.
    pub mask: LayerMask,

    /// Name of the event fired on a matching collision.
    pub event: String,
}

impl ContactEventConfig {
    pub fn with_mask(mut self, mask: LayerMask) -> Self {
        self.mask = mask;
        self
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = event.into();
        self
    }
}

impl Default for ContactEventConfig {
    fn default() -> Self {
        Self {
            mask: LayerMask::NONE,
            event: "on_contact".to_string(),
        }
    }
}

//=== ContactEvent ========================================================

pub struct ContactEvent {
    config: ContactEventConfig,
}

impl ContactEvent {
    pub fn new(config: ContactEventConfig) -> Self {
        Self { config }
    }
}

impl Behaviour for ContactEvent {
    fn on_contact(&mut self, ctx: &mut Context<'_>, contact: &Contact) {
        let collided = contact.kind == ContactKind::Collision;
        if collided && self.config.mask.contains(contact.other_layer) {
            ctx.fire(&self.config.event);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::{EntityBuilder, Scene};
    use crate::core::world::{EntityId, Layer};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn setup() -> (Scene, EntityId, Arc<AtomicUsize>) {
        let layers = [Layer::new(1).unwrap(), Layer::new(5).unwrap()];
        let mut scene = Scene::new();
        let plate = scene.spawn(
            EntityBuilder::new("PressurePlate").with_behaviour(ContactEvent::new(
                ContactEventConfig::default()
                    .with_mask(LayerMask::from_layers(&layers))
                    .with_event("plate_pressed"),
            )),
        );

        let presses = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&presses);
        scene.events_mut().subscribe("plate_pressed", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        (scene, plate, presses)
    }

    #[test]
    fn config_defaults() {
        let config = ContactEventConfig::default();
        assert_eq!(config.mask, LayerMask::NONE);
        assert_eq!(config.event, "on_contact");
    }

    #[test]
    fn matching_collision_fires_event() {
        let (mut scene, plate, presses) = setup();
        let crate_box = scene.spawn(EntityBuilder::new("Crate").on_layer(Layer::new(5).unwrap()));

        scene.apply_contact(crate_box, plate, ContactKind::Collision);
        scene.apply_contact(plate, crate_box, ContactKind::Collision);

        assert_eq!(presses.load(Ordering::SeqCst), 2);
        assert_eq!(scene.events().fire_count("plate_pressed"), 2);
    }

    #[test]
    fn other_layers_are_ignored() {
        let (mut scene, plate, presses) = setup();
        let ghost = scene.spawn(EntityBuilder::new("Ghost").on_layer(Layer::new(2).unwrap()));

        scene.apply_contact(ghost, plate, ContactKind::Collision);

        assert_eq!(presses.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn trigger_overlaps_are_ignored() {
        let (mut scene, plate, presses) = setup();
        let crate_box = scene.spawn(EntityBuilder::new("Crate").on_layer(Layer::new(1).unwrap()));

        scene.apply_contact(crate_box, plate, ContactKind::Trigger);

        assert_eq!(presses.load(Ordering::SeqCst), 0);
    }
}
