//! Per-type component storage.
//!
//! A [`ComponentStore<T>`] maps entities to values of one component type. It
//! knows nothing about membership masks; keeping the mask in sync is the
//! job of the coordinator that owns both.
//!
//! [`ComponentStores`] is the arena of all stores in a world, addressed by
//! [`ComponentIndex`]. Slots are held as [`ErasedStore`] trait objects so
//! the coordinator can clean up an entity or join query fields without
//! knowing the concrete types.

use std::any::Any;
use std::collections::HashMap;

use crate::component::Component;
use crate::entity::Entity;
use crate::registry::ComponentIndex;

/// Stores the values of one component type, keyed by entity.
#[derive(Debug)]
pub struct ComponentStore<T: Component> {
    values: HashMap<Entity, T>,
}

impl<T: Component> ComponentStore<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Inserts or overwrites the value for `entity`, returning the previous one.
    pub fn put(&mut self, entity: Entity, value: T) -> Option<T> {
        self.values.insert(entity, value)
    }

    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.values.get(&entity)
    }

    #[must_use]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.values.get_mut(&entity)
    }

    /// Removes the value for `entity`. Removing an absent entry is a no-op.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.values.remove(&entity)
    }

    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.values.contains_key(&entity)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates stored `(entity, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.values.iter().map(|(entity, value)| (*entity, value))
    }
}

impl<T: Component> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Object-safe view of a [`ComponentStore`], independent of its value type.
pub trait ErasedStore: Send + Sync {
    /// Returns the value for `entity` as `&dyn Any`.
    fn get_any(&self, entity: Entity) -> Option<&dyn Any>;

    fn contains(&self, entity: Entity) -> bool;

    /// Drops the value for `entity`, returning whether one was present.
    fn remove_entity(&mut self, entity: Entity) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStore for ComponentStore<T> {
    fn get_any(&self, entity: Entity) -> Option<&dyn Any> {
        self.get(entity).map(|value| value as &dyn Any)
    }

    fn contains(&self, entity: Entity) -> bool {
        ComponentStore::contains(self, entity)
    }

    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn len(&self) -> usize {
        ComponentStore::len(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// All component stores of a world, one slot per [`ComponentIndex`].
#[derive(Default)]
pub struct ComponentStores {
    slots: Vec<Box<dyn ErasedStore>>,
}

impl ComponentStores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Appends an empty store for `T` and returns the slot it occupies.
    ///
    /// Callers push stores in registration order so that slot `i` belongs
    /// to `ComponentIndex(i)`.
    pub fn push<T: Component>(&mut self) -> ComponentIndex {
        let index = ComponentIndex(self.slots.len() as u32);
        self.slots.push(Box::new(ComponentStore::<T>::new()));
        index
    }

    /// Returns the typed store at `index`, or `None` if the slot is missing
    /// or holds a different type.
    #[must_use]
    pub fn typed<T: Component>(&self, index: ComponentIndex) -> Option<&ComponentStore<T>> {
        self.slots.get(index.as_usize())?.as_any().downcast_ref()
    }

    #[must_use]
    pub fn typed_mut<T: Component>(
        &mut self,
        index: ComponentIndex,
    ) -> Option<&mut ComponentStore<T>> {
        self.slots.get_mut(index.as_usize())?.as_any_mut().downcast_mut()
    }

    #[must_use]
    pub fn erased(&self, index: ComponentIndex) -> Option<&dyn ErasedStore> {
        self.slots.get(index.as_usize()).map(|slot| slot.as_ref())
    }

    #[must_use]
    pub fn erased_mut(&mut self, index: ComponentIndex) -> Option<&mut (dyn ErasedStore + 'static)> {
        self.slots.get_mut(index.as_usize()).map(|slot| slot.as_mut())
    }

    /// Removes `entity` from every store, returning how many held it.
    pub fn remove_entity(&mut self, entity: Entity) -> usize {
        self.slots
            .iter_mut()
            .map(|slot| slot.remove_entity(entity))
            .filter(|removed| *removed)
            .count()
    }

    /// Returns the number of slots (registered component types).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl std::fmt::Debug for ComponentStores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.slots.iter().map(|slot| slot.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, serde::Serialize)]
    struct Health(u32);
    impl Component for Health {
        fn type_name() -> &'static str {
            "Health"
        }
    }

    #[derive(Debug, Clone, PartialEq, serde::Serialize)]
    struct Tag;
    impl Component for Tag {
        fn type_name() -> &'static str {
            "Tag"
        }
    }

    #[test]
    fn test_put_overwrites() {
        let mut store = ComponentStore::new();
        let e = Entity::from_raw(1);
        assert_eq!(store.put(e, Health(10)), None);
        assert_eq!(store.put(e, Health(20)), Some(Health(10)));
        assert_eq!(store.get(e), Some(&Health(20)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = ComponentStore::<Health>::new();
        let e = Entity::from_raw(1);
        assert_eq!(store.remove(e), None);
        store.put(e, Health(1));
        assert!(store.contains(e));
        assert_eq!(store.remove(e), Some(Health(1)));
        assert!(!store.contains(e));
        assert!(store.is_empty());
    }

    #[test]
    fn test_erased_get_downcasts() {
        let mut store = ComponentStore::new();
        let e = Entity::from_raw(3);
        store.put(e, Health(7));

        let erased: &dyn ErasedStore = &store;
        let value = erased.get_any(e).and_then(|v| v.downcast_ref::<Health>());
        assert_eq!(value, Some(&Health(7)));
        assert!(erased.get_any(Entity::from_raw(4)).is_none());
    }

    #[test]
    fn test_stores_typed_access_checks_type() {
        let mut stores = ComponentStores::new();
        let health = stores.push::<Health>();
        let tag = stores.push::<Tag>();
        assert_eq!(health, ComponentIndex(0));
        assert_eq!(tag, ComponentIndex(1));

        assert!(stores.typed::<Health>(health).is_some());
        assert!(stores.typed::<Tag>(health).is_none());
        assert!(stores.typed::<Health>(ComponentIndex(9)).is_none());
    }

    #[test]
    fn test_stores_remove_entity_everywhere() {
        let mut stores = ComponentStores::new();
        let health = stores.push::<Health>();
        let tag = stores.push::<Tag>();
        let e = Entity::from_raw(1);
        let other = Entity::from_raw(2);

        stores.typed_mut::<Health>(health).unwrap().put(e, Health(5));
        stores.typed_mut::<Tag>(tag).unwrap().put(e, Tag);
        stores.typed_mut::<Tag>(tag).unwrap().put(other, Tag);

        assert_eq!(stores.remove_entity(e), 2);
        assert_eq!(stores.remove_entity(e), 0);
        assert!(!stores.erased(health).unwrap().contains(e));
        assert!(stores.erased(tag).unwrap().contains(other));
    }
}
