//! Entity identifiers.
//!
//! An [`Entity`] carries no data. It only joins rows across component
//! stores, and its ordering is the order in which entities were created.

use serde::{Deserialize, Serialize};

/// Identifier of one entity within one world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity(pub u64);

impl Entity {
    /// Reserved id 0. No allocator ever returns it.
    pub const INVALID: Entity = Entity(0);

    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Hands out entity ids 1, 2, 3, ... for the lifetime of a world.
///
/// Only the most recently issued id is remembered. Deleting an entity never
/// returns its id here, so a stale handle cannot alias a newer entity.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    last: Entity,
}

impl EntityAllocator {
    /// Issues the id after the last one handed out.
    pub fn allocate(&mut self) -> Entity {
        self.last = Entity(self.last.0 + 1);
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_is_the_default_entity() {
        assert_eq!(Entity::default(), Entity::INVALID);
        assert!(!Entity::INVALID.is_valid());
        assert!(Entity::from_raw(42).is_valid());
    }

    #[test]
    fn test_first_id_is_one_and_ids_increase() {
        let mut alloc = EntityAllocator::default();
        let issued: Vec<u64> = (0..4).map(|_| alloc.allocate().id()).collect();
        assert_eq!(issued, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_allocators_are_independent() {
        let mut a = EntityAllocator::default();
        let mut b = EntityAllocator::default();
        a.allocate();
        a.allocate();
        assert_eq!(b.allocate(), Entity::from_raw(1));
    }

    #[test]
    fn test_entity_display() {
        assert_eq!(Entity::from_raw(7).to_string(), "Entity(7)");
    }
}
