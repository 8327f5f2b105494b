//=========================================================================
// Entity Builder
//=========================================================================
//
// Describes an entity before it enters a scene: placement, layer,
// capabilities and behaviours. Consumed by `Scene::spawn`.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Internal Dependencies ===============================================

use super::Behaviour;
use crate::core::world::{CapabilityStore, Layer, Transform};

//=== EntityBuilder =======================================================

/// Fluent description of an entity to spawn.
///
/// ```ignore
/// let bomb = scene.spawn(
///     EntityBuilder::new("Bomb")
///         .at(Vec3::new(0.0, 0.0, 4.0))
///         .with_component(AreaDamage::default())
///         .with_behaviour(Bomb::new(BombConfig::default())),
/// );
/// ```
pub struct EntityBuilder {
    pub(crate) name: String,
    pub(crate) transform: Transform,
    pub(crate) layer: Layer,
    pub(crate) capabilities: CapabilityStore,
    pub(crate) behaviours: Vec<Box<dyn Behaviour>>,
}

impl EntityBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            layer: Layer::DEFAULT,
            capabilities: CapabilityStore::new(),
            behaviours: Vec::new(),
        }
    }

    /// Sets the spawn position.
    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn on_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Attaches a capability under the type `T`, usually a trait object.
    ///
    /// Use a turbofish to pick the interface it is looked up by:
    /// `.with_capability::<dyn ManaUser>(Box::new(pool))`.
    pub fn with_capability<T>(mut self, capability: Box<T>) -> Self
    where
        T: ?Sized + Send + 'static,
    {
        self.capabilities.insert(capability);
        self
    }

    /// Attaches a concrete component, looked up by its own type.
    pub fn with_component<T>(self, component: T) -> Self
    where
        T: Send + 'static,
    {
        self.with_capability(Box::new(component))
    }

    /// Attaches a behaviour. Behaviours run in the order they were added.
    pub fn with_behaviour<B>(mut self, behaviour: B) -> Self
    where
        B: Behaviour,
    {
        self.behaviours.push(Box::new(behaviour));
        self
    }
}
