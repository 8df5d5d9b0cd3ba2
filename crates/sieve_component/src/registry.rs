//! Component registry: dense index assignment for component types.
//!
//! The registry is the sole source of truth for "is this component kind
//! known". Each kind receives a [`ComponentIndex`] on first registration;
//! indices start at 0, grow by one per new kind, and are never reassigned.
//! The index doubles as the bit position in a [`ComponentMask`] and as the
//! slot of the kind's store in [`ComponentStores`].
//!
//! [`ComponentMask`]: crate::mask::ComponentMask
//! [`ComponentStores`]: crate::store::ComponentStores

use std::any::TypeId;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentMeta, ComponentTypeId};

/// Errors raised while registering component types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A different Rust type already holds this component name.
    #[error("component name {0:?} is already registered for a different type")]
    NameTaken(&'static str),
}

/// Dense, registration-ordered index of a component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentIndex(pub u32);

impl ComponentIndex {
    /// The index as a `usize`, for bit and slot addressing.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ComponentIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Maps component kinds to their [`ComponentIndex`].
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    /// Metadata in index order: `metas[i]` describes `ComponentIndex(i)`.
    metas: Vec<ComponentMeta>,
    by_id: HashMap<ComponentTypeId, ComponentIndex>,
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with room for `capacity` component types.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            metas: Vec::with_capacity(capacity),
            by_id: HashMap::with_capacity(capacity),
        }
    }

    /// Registers `T`, returning its index. Registering an already known type
    /// returns the existing index and changes nothing.
    ///
    /// Component names must be unique: if a different Rust type was already
    /// registered under `T::type_name()`, the registry is left unchanged and
    /// [`RegistryError::NameTaken`] is returned.
    pub fn register<T: Component>(&mut self) -> Result<ComponentIndex, RegistryError> {
        let type_id = T::component_type_id();
        if let Some(&index) = self.by_id.get(&type_id) {
            let existing = &self.metas[index.as_usize()];
            if existing.rust_type != TypeId::of::<T>() {
                return Err(RegistryError::NameTaken(existing.name));
            }
            return Ok(index);
        }

        let index = ComponentIndex(self.metas.len() as u32);
        self.metas.push(T::meta());
        self.by_id.insert(type_id, index);
        Ok(index)
    }

    /// Returns the index of `T`, if `T` itself (not merely its name) is registered.
    #[must_use]
    pub fn index_of<T: Component>(&self) -> Option<ComponentIndex> {
        let index = self.index_of_id(T::component_type_id())?;
        (self.metas[index.as_usize()].rust_type == TypeId::of::<T>()).then_some(index)
    }

    /// Returns the index registered for a name-derived type id.
    #[must_use]
    pub fn index_of_id(&self, type_id: ComponentTypeId) -> Option<ComponentIndex> {
        self.by_id.get(&type_id).copied()
    }

    /// Returns the metadata of a registered index.
    #[must_use]
    pub fn meta(&self, index: ComponentIndex) -> Option<&ComponentMeta> {
        self.metas.get(index.as_usize())
    }

    /// Returns the number of registered component types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.metas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metas.is_empty()
    }

    /// Iterates registered types in index order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentIndex, &ComponentMeta)> {
        self.metas
            .iter()
            .enumerate()
            .map(|(i, meta)| (ComponentIndex(i as u32), meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize)]
    struct Position;
    impl Component for Position {
        fn type_name() -> &'static str {
            "Position"
        }
    }

    #[derive(serde::Serialize)]
    struct Velocity;
    impl Component for Velocity {
        fn type_name() -> &'static str {
            "Velocity"
        }
    }

    /// A different Rust type reusing the name `"Position"`.
    #[derive(serde::Serialize)]
    struct Impostor;
    impl Component for Impostor {
        fn type_name() -> &'static str {
            "Position"
        }
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = ComponentRegistry::new();
        let first = registry.register::<Position>().unwrap();
        for _ in 0..5 {
            assert_eq!(registry.register::<Position>(), Ok(first));
        }
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_indices_follow_first_registration_order() {
        let mut registry = ComponentRegistry::new();
        assert_eq!(registry.register::<Velocity>(), Ok(ComponentIndex(0)));
        assert_eq!(registry.register::<Position>(), Ok(ComponentIndex(1)));
        assert_eq!(registry.register::<Velocity>(), Ok(ComponentIndex(0)));

        let names: Vec<_> = registry.iter().map(|(_, meta)| meta.name).collect();
        assert_eq!(names, vec!["Velocity", "Position"]);
    }

    #[test]
    fn test_lookup_by_type_and_by_name() {
        let mut registry = ComponentRegistry::new();
        assert_eq!(registry.index_of::<Position>(), None);

        let index = registry.register::<Position>().unwrap();
        assert_eq!(registry.index_of::<Position>(), Some(index));
        assert_eq!(
            registry.index_of_id(ComponentTypeId::from_name("Position")),
            Some(index)
        );
        assert_eq!(registry.index_of::<Velocity>(), None);
        assert_eq!(registry.meta(index).unwrap().field_name, "position");
    }

    #[test]
    fn test_same_name_different_type_does_not_resolve() {
        let mut registry = ComponentRegistry::new();
        registry.register::<Position>().unwrap();
        assert_eq!(registry.index_of::<Impostor>(), None);
    }

    #[test]
    fn test_register_name_collision_is_rejected() {
        let mut registry = ComponentRegistry::new();
        registry.register::<Position>().unwrap();

        let err = registry.register::<Impostor>().unwrap_err();
        assert_eq!(err, RegistryError::NameTaken("Position"));
        assert_eq!(
            err.to_string(),
            "component name \"Position\" is already registered for a different type"
        );

        // The first registration is untouched.
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.index_of::<Position>(), Some(ComponentIndex(0)));
        assert_eq!(registry.register::<Position>(), Ok(ComponentIndex(0)));
    }
}
