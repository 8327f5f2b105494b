//=========================================================================
// World
//=========================================================================
//
// Entity storage, capability lookup and spatial queries.
//
// Architecture:
//   World
//     ├─ entities: Arena<EntityRecord>  (name, transform, layer, capabilities)
//     └─ destroyed: Vec<EntityId>       (drained by the scene after callbacks)
//
// Destruction is immediate: a destroyed entity disappears from every query
// at once. Lifecycle follow-up (timer cancellation, on_destroy hooks) is
// driven by the scene from the `destroyed` queue.
//
//=========================================================================

//=== Module Declarations =================================================

mod capability;
mod entity;

//=== External Dependencies ===============================================

use std::fmt;

use generational_arena::Arena;
use glam::Vec3;
use log::{debug, info};

//=== Public API ==========================================================

pub use capability::CapabilityStore;
pub use entity::{EntityId, Layer, LayerError, LayerMask, Transform};

//=== EntityRecord ========================================================

struct EntityRecord {
    name: String,
    transform: Transform,
    layer: Layer,
    capabilities: CapabilityStore,
}

//=== WorldError ==========================================================

/// Errors for world operations that cannot be silently skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldError {
    /// The entity was never spawned or has already been destroyed.
    UnknownEntity(EntityId),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownEntity(id) => write!(f, "Unknown or destroyed entity {}", id),
        }
    }
}

impl std::error::Error for WorldError {}

//=== World ===============================================================

/// Every live entity of a scene together with its capabilities.
pub struct World {
    entities: Arena<EntityRecord>,
    destroyed: Vec<EntityId>,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: Arena::new(),
            destroyed: Vec::new(),
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Spawns a bare entity on the default layer.
    pub fn spawn(&mut self, name: impl Into<String>, position: Vec3) -> EntityId {
        self.spawn_with(
            name.into(),
            Transform::from_position(position),
            Layer::DEFAULT,
            CapabilityStore::new(),
        )
    }

    pub(crate) fn spawn_with(
        &mut self,
        name: String,
        transform: Transform,
        layer: Layer,
        capabilities: CapabilityStore,
    ) -> EntityId {
        let id = EntityId(self.entities.insert(EntityRecord {
            name,
            transform,
            layer,
            capabilities,
        }));

        debug!("Spawned entity {} ({:?})", id, self.name(id).unwrap_or_default());
        id
    }

    /// Removes an entity immediately.
    ///
    /// Returns `false` if the entity was already gone.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        match self.entities.remove(id.0) {
            Some(record) => {
                info!("Destroyed entity {} ({:?})", id, record.name);
                self.destroyed.push(id);
                true
            }
            None => {
                debug!("Entity {} already destroyed", id);
                false
            }
        }
    }

    /// Takes the ids destroyed since the last call, oldest first.
    pub fn take_destroyed(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.destroyed)
    }

    //--- Capabilities -----------------------------------------------------

    /// Attaches a capability to an entity under type `T`.
    ///
    /// Returns `Ok(true)` if an existing capability of that type was replaced.
    pub fn attach<T>(&mut self, id: EntityId, capability: Box<T>) -> Result<bool, WorldError>
    where
        T: ?Sized + Send + 'static,
    {
        let record = self
            .entities
            .get_mut(id.0)
            .ok_or(WorldError::UnknownEntity(id))?;

        Ok(record.capabilities.insert(capability))
    }

    /// Looks up the capability `T` on an entity.
    ///
    /// `None` covers both a missing capability and a dead entity.
    pub fn capability<T>(&self, id: EntityId) -> Option<&T>
    where
        T: ?Sized + 'static,
    {
        self.entities.get(id.0)?.capabilities.get::<T>()
    }

    /// Mutable variant of [`capability`](Self::capability).
    pub fn capability_mut<T>(&mut self, id: EntityId) -> Option<&mut T>
    where
        T: ?Sized + 'static,
    {
        self.entities.get_mut(id.0)?.capabilities.get_mut::<T>()
    }

    //--- Queries ----------------------------------------------------------

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains(id.0)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.entities.get(id.0).map(|record| record.name.as_str())
    }

    pub fn layer(&self, id: EntityId) -> Option<Layer> {
        self.entities.get(id.0).map(|record| record.layer)
    }

    pub fn set_layer(&mut self, id: EntityId, layer: Layer) -> Result<(), WorldError> {
        let record = self
            .entities
            .get_mut(id.0)
            .ok_or(WorldError::UnknownEntity(id))?;
        record.layer = layer;
        Ok(())
    }

    pub fn position(&self, id: EntityId) -> Option<Vec3> {
        self.transform(id).map(|transform| transform.position)
    }

    pub fn transform(&self, id: EntityId) -> Option<&Transform> {
        self.entities.get(id.0).map(|record| &record.transform)
    }

    pub fn transform_mut(&mut self, id: EntityId) -> Option<&mut Transform> {
        self.entities.get_mut(id.0).map(|record| &mut record.transform)
    }

    //--- Spatial ----------------------------------------------------------

    /// Returns every entity whose position lies within `radius` of `center`.
    ///
    /// The boundary is inclusive. A negative or NaN radius matches nothing.
    pub fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<EntityId> {
        if radius.is_nan() || radius < 0.0 {
            return Vec::new();
        }

        let radius_sq = radius * radius;
        self.entities
            .iter()
            .filter(|(_, record)| record.transform.position.distance_squared(center) <= radius_sq)
            .map(|(index, _)| EntityId(index))
            .collect()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
