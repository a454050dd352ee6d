//! Typed component storage
//!
//! One [`ComponentStorage`] exists per component type. Storages are kept
//! type-erased inside the [`World`](super::World) behind [`ErasedStorage`] so
//! entity destruction can purge every component without knowing its type.

use super::{Component, Entity};
use slotmap::SecondaryMap;
use std::any::Any;

/// Storage for all components of one type, keyed by entity
pub struct ComponentStorage<T: Component> {
    components: SecondaryMap<Entity, T>,
}

impl<T: Component> ComponentStorage<T> {
    /// Create an empty storage
    pub fn new() -> Self {
        Self {
            components: SecondaryMap::new(),
        }
    }

    /// Insert a component, returning the one it replaced
    pub fn insert(&mut self, entity: Entity, component: T) -> Option<T> {
        self.components.insert(entity, component)
    }

    /// Remove the component of `entity`
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.components.remove(entity)
    }

    /// Get a component
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.components.get(entity)
    }

    /// Get a component mutably
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.components.get_mut(entity)
    }

    /// Whether `entity` has a component here
    pub fn contains(&self, entity: Entity) -> bool {
        self.components.contains_key(entity)
    }

    /// Number of stored components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the storage is empty
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate in entity slot order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.components.iter()
    }

    /// Iterate mutably in entity slot order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.components.iter_mut()
    }
}

impl<T: Component> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a [`ComponentStorage`]
pub(crate) trait ErasedStorage: Any + Send + Sync {
    fn remove_entity(&mut self, entity: Entity);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStorage for ComponentStorage<T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.components.remove(entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
