//! The world: entity index and mutation coordinator.
//!
//! [`World`] owns the entity allocator, the `Entity -> ComponentMask` index,
//! the component registry, and the per-type stores. Every component
//! mutation goes through it so that, after each public call, an entity's
//! mask bit `i` is set exactly when store `i` holds a value for it.

use std::collections::BTreeMap;

use sieve_component::{
    Component, ComponentIndex, ComponentKey, ComponentMask, ComponentRegistry, ComponentStores,
    Entity, EntityAllocator, QueryDescriptor,
};
use tracing::{debug, trace};

use crate::bundle::{Bundle, BundleWriter, resolve};
use crate::config::WorldConfig;
use crate::error::WorldError;
use crate::query::{self, QueryResult};

/// Component storage plus the bitmask index over it.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    /// Entity ID allocator.
    allocator: EntityAllocator,
    /// Membership mask of every live entity, ordered by id (= creation order).
    masks: BTreeMap<Entity, ComponentMask>,
    registry: ComponentRegistry,
    /// `stores` slot `i` belongs to `ComponentIndex(i)`.
    stores: ComponentStores,
}

impl World {
    /// Create a new empty world with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Create a new empty world with the given configuration.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            registry: ComponentRegistry::with_capacity(config.component_capacity),
            stores: ComponentStores::with_capacity(config.component_capacity),
            allocator: EntityAllocator::default(),
            masks: BTreeMap::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    // -- Registration --

    /// Registers component type `T`, returning its index. Idempotent.
    ///
    /// Fails with [`WorldError::DuplicateComponentName`], leaving the world
    /// unchanged, if a different type is already registered under
    /// `T::type_name()`.
    pub fn register<T: Component>(&mut self) -> Result<ComponentIndex, WorldError> {
        let known = self.registry.len();
        let index = self.registry.register::<T>()?;
        if self.registry.len() > known {
            self.stores.push::<T>();
            debug!(
                world = %self.config.name,
                component = T::type_name(),
                %index,
                "registered component type"
            );
        }
        Ok(index)
    }

    /// Returns the registry of component types known to this world.
    #[must_use]
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Returns the index of `T`, if registered.
    #[must_use]
    pub fn component_index<T: Component>(&self) -> Option<ComponentIndex> {
        self.registry.index_of::<T>()
    }

    // -- Entity lifecycle --

    /// Creates an entity holding the components of `bundle`.
    ///
    /// Every component type is resolved before the entity is allocated, so
    /// an unregistered type leaves the world untouched. When the bundle
    /// repeats a type, the last value wins.
    pub fn create_entity<B: Bundle>(&mut self, bundle: B) -> Result<Entity, WorldError> {
        let indices = B::component_indices(&self.registry)?;

        let entity = self.allocator.allocate();
        self.masks
            .insert(entity, ComponentMask::with_capacity(self.registry.len()));

        let mut writer = EntityWriter {
            world: self,
            entity,
            indices: &indices,
            cursor: 0,
        };
        bundle.write(&mut writer);

        debug!(
            world = %self.config.name,
            %entity,
            components = indices.len(),
            "created entity"
        );
        Ok(entity)
    }

    /// Deletes an entity, dropping all of its components.
    ///
    /// Deleting an unknown or already deleted entity is a no-op. Returns
    /// `true` if a live entity was deleted.
    pub fn delete_entity(&mut self, entity: Entity) -> bool {
        if self.masks.remove(&entity).is_none() {
            return false;
        }
        let removed = self.stores.remove_entity(entity);
        debug!(world = %self.config.name, %entity, components = removed, "deleted entity");
        true
    }

    /// Returns `true` if `entity` was created and not yet deleted.
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.masks.contains_key(&entity)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.masks.len()
    }

    /// Iterates live entities in ascending id order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.masks.keys().copied()
    }

    /// Returns the membership mask of a live entity.
    #[must_use]
    pub fn component_mask(&self, entity: Entity) -> Option<&ComponentMask> {
        self.masks.get(&entity)
    }

    // -- Component operations --

    /// Adds `value` to `entity`, replacing any existing component of the
    /// same type.
    ///
    /// The type must already be registered. Adding to an entity that is not
    /// alive is a no-op, so deleted ids are never revived.
    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> Result<(), WorldError> {
        let index = resolve::<T>(&self.registry)?;
        if !self.is_alive(entity) {
            trace!(
                world = %self.config.name,
                %entity,
                component = T::type_name(),
                "ignored add to dead entity"
            );
            return Ok(());
        }
        self.insert_at(entity, index, value);
        Ok(())
    }

    /// Removes the `T` component from `entity`. Idempotent.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<(), WorldError> {
        let index = resolve::<T>(&self.registry)?;
        self.remove_at(entity, index);
        Ok(())
    }

    /// Removes the component named by `key` from `entity`. Idempotent.
    pub fn remove_component_by_key(
        &mut self,
        entity: Entity,
        key: &ComponentKey,
    ) -> Result<(), WorldError> {
        let index = self.resolve_key(key)?;
        self.remove_at(entity, index);
        Ok(())
    }

    /// Returns `true` if `entity` holds a `T`. Unknown entities and
    /// unregistered types read as absent.
    #[must_use]
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.registry
            .index_of::<T>()
            .is_some_and(|index| self.has_index(entity, index))
    }

    /// Returns `true` if `entity` holds the component named by `key`.
    #[must_use]
    pub fn has_component_key(&self, entity: Entity, key: &ComponentKey) -> bool {
        self.registry
            .index_of_id(key.id())
            .is_some_and(|index| self.has_index(entity, index))
    }

    /// Returns the `T` component of `entity`, if any.
    #[must_use]
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        let index = self.registry.index_of::<T>()?;
        self.stores.typed::<T>(index)?.get(entity)
    }

    /// Returns the `T` component of `entity` for in-place mutation.
    ///
    /// Mutating a value never changes which types the entity holds, so the
    /// index is unaffected.
    #[must_use]
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        let index = self.registry.index_of::<T>()?;
        self.stores.typed_mut::<T>(index)?.get_mut(entity)
    }

    /// Returns the number of entities holding a `T`.
    #[must_use]
    pub fn component_count<T: Component>(&self) -> usize {
        self.registry
            .index_of::<T>()
            .and_then(|index| self.stores.typed::<T>(index))
            .map_or(0, |store| store.len())
    }

    // -- Query --

    /// Runs `descriptor` against the world.
    ///
    /// All keys are resolved before the scan; an unregistered key fails the
    /// whole query. A descriptor with no required types matches nothing.
    /// Rows come back in ascending entity id order.
    pub fn query(&self, descriptor: &QueryDescriptor) -> Result<QueryResult<'_>, WorldError> {
        let plan = query::QueryPlan::resolve(self, descriptor)?;
        let result = plan.execute(self);
        if self.config.trace_queries {
            trace!(
                world = %self.config.name,
                required = descriptor.required.len(),
                optional = descriptor.optional.len(),
                excluded = descriptor.excluded.len(),
                scanned = self.masks.len(),
                matched = result.len(),
                "query"
            );
        }
        Ok(result)
    }

    // -- Crate-internal access for the query engine --

    pub(crate) fn resolve_key(&self, key: &ComponentKey) -> Result<ComponentIndex, WorldError> {
        self.registry
            .index_of_id(key.id())
            .ok_or_else(|| WorldError::UnknownComponentType(key.name().to_string()))
    }

    pub(crate) fn masks(&self) -> impl Iterator<Item = (Entity, &ComponentMask)> {
        self.masks.iter().map(|(entity, mask)| (*entity, mask))
    }

    pub(crate) fn stores(&self) -> &ComponentStores {
        &self.stores
    }

    // -- Helpers --

    fn has_index(&self, entity: Entity, index: ComponentIndex) -> bool {
        self.masks
            .get(&entity)
            .is_some_and(|mask| mask.contains(index))
    }

    /// Writes the store, then sets the bit. `entity` must be alive.
    fn insert_at<T: Component>(&mut self, entity: Entity, index: ComponentIndex, value: T) {
        let Some(store) = self.stores.typed_mut::<T>(index) else {
            return;
        };
        let replaced = store.put(entity, value).is_some();
        if let Some(mask) = self.masks.get_mut(&entity) {
            mask.insert(index);
        }
        trace!(
            world = %self.config.name,
            %entity,
            component = T::type_name(),
            replaced,
            "added component"
        );
    }

    /// Clears the store entry, then the bit.
    fn remove_at(&mut self, entity: Entity, index: ComponentIndex) {
        let removed = self
            .stores
            .erased_mut(index)
            .is_some_and(|store| store.remove_entity(entity));
        if let Some(mask) = self.masks.get_mut(&entity) {
            mask.remove(index);
        }
        trace!(world = %self.config.name, %entity, %index, removed, "removed component");
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Feeds a bundle's components into a freshly created entity, using the
/// indices resolved before allocation.
struct EntityWriter<'w> {
    world: &'w mut World,
    entity: Entity,
    indices: &'w [ComponentIndex],
    cursor: usize,
}

impl BundleWriter for EntityWriter<'_> {
    fn put<T: Component>(&mut self, value: T) {
        if let Some(&index) = self.indices.get(self.cursor) {
            self.world.insert_at(self.entity, index, value);
        }
        self.cursor += 1;
    }
}
