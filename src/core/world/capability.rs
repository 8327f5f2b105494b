//=========================================================================
// Capability Store
//=========================================================================
//
// Type-keyed storage for the capabilities attached to one entity.
//
// Architecture:
//   insert::<T>(Box<T>) → HashMap<TypeId, Box<dyn Any>> (holding Box<T>)
//                              ↓
//   get::<T>() → Option<&T>   (absent capability is None, never an error)
//
// `T` may be a trait object (`dyn ManaUser`) or a concrete component
// (`AreaDamage`). Lookups must use the same type the value was stored as.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{Any, TypeId};
use std::collections::HashMap;

//=== CapabilityStore =====================================================

/// Capabilities of a single entity, at most one per type.
#[derive(Default)]
pub struct CapabilityStore {
    slots: HashMap<TypeId, Box<dyn Any + Send>>,
}

impl CapabilityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    //--- Mutation ---------------------------------------------------------

    /// Stores `value` under the capability type `T`.
    ///
    /// Returns `true` if a previous capability of the same type was replaced.
    pub fn insert<T>(&mut self, value: Box<T>) -> bool
    where
        T: ?Sized + Send + 'static,
    {
        self.slots.insert(TypeId::of::<T>(), Box::new(value)).is_some()
    }

    /// Removes the capability of type `T`, returning whether one was present.
    pub fn remove<T>(&mut self) -> bool
    where
        T: ?Sized + 'static,
    {
        self.slots.remove(&TypeId::of::<T>()).is_some()
    }

    //--- Lookup -----------------------------------------------------------

    /// Returns the capability of type `T`, if attached.
    pub fn get<T>(&self) -> Option<&T>
    where
        T: ?Sized + 'static,
    {
        self.slots
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.downcast_ref::<Box<T>>())
            .map(|boxed| &**boxed)
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut<T>(&mut self) -> Option<&mut T>
    where
        T: ?Sized + 'static,
    {
        self.slots
            .get_mut(&TypeId::of::<T>())
            .and_then(|slot| slot.downcast_mut::<Box<T>>())
            .map(|boxed| &mut **boxed)
    }

    /// Returns `true` if a capability of type `T` is attached.
    pub fn contains<T>(&self) -> bool
    where
        T: ?Sized + 'static,
    {
        self.slots.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

//=========================================================================
// Tests
//=========================================================================
