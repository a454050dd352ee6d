//! ECS World implementation

use super::storage::{ComponentStorage, ErasedStorage};
use super::{Component, Entity, Query};
use slotmap::SlotMap;
use std::any::TypeId;
use std::collections::HashMap;

/// ECS World containing all entities and components
///
/// Iteration over entities and components follows entity slot order, which
/// is creation order as long as no entity has been destroyed.
pub struct World {
    entities: SlotMap<Entity, ()>,
    component_storages: HashMap<TypeId, Box<dyn ErasedStorage>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            component_storages: HashMap::new(),
        }
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        self.entities.insert(())
    }

    /// Destroy an entity and every component attached to it
    ///
    /// Returns `false` if the entity was already gone.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity).is_none() {
            return false;
        }
        for storage in self.component_storages.values_mut() {
            storage.remove_entity(entity);
        }
        true
    }

    /// Whether the entity exists
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Add a component to an entity, replacing any previous one of that type
    ///
    /// Components for dead entities are dropped.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) {
        if !self.is_alive(entity) {
            log::warn!("Ignoring {} for dead {}", std::any::type_name::<T>(), entity);
            return;
        }
        self.storage_mut::<T>().insert(entity, component);
    }

    /// Remove a component from an entity
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.existing_storage_mut::<T>()?.remove(entity)
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.get(entity)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.existing_storage_mut::<T>()?.get_mut(entity)
    }

    /// Whether an entity has a component of type `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.storage::<T>().is_some_and(|storage| storage.contains(entity))
    }

    /// All components of type `T` with their owners
    pub fn query<T: Component>(&self) -> Vec<(Entity, &T)> {
        self.storage::<T>()
            .map(|storage| storage.iter().collect())
            .unwrap_or_default()
    }

    /// All components of type `T` with their owners, mutably
    pub fn query_mut<T: Component>(&mut self) -> Vec<(Entity, &mut T)> {
        self.existing_storage_mut::<T>()
            .map(|storage| storage.iter_mut().collect())
            .unwrap_or_default()
    }

    /// Handles of every entity owning all components in `Q`
    pub fn entities_with<Q: Query>(&self) -> Vec<Entity> {
        self.entities
            .keys()
            .filter(|&entity| Q::matches(self, entity))
            .collect()
    }

    /// Get an iterator over all entities
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys()
    }

    fn storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        self.component_storages
            .get(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any().downcast_ref::<ComponentStorage<T>>())
    }

    fn existing_storage_mut<T: Component>(&mut self) -> Option<&mut ComponentStorage<T>> {
        self.component_storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any_mut().downcast_mut::<ComponentStorage<T>>())
    }

    fn storage_mut<T: Component>(&mut self) -> &mut ComponentStorage<T> {
        let storage = self
            .component_storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentStorage::<T>::new()));
        match storage.as_any_mut().downcast_mut::<ComponentStorage<T>>() {
            Some(storage) => storage,
            None => unreachable!("storage registered under the TypeId of another type"),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
