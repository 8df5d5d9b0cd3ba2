//! Query descriptors.
//!
//! A [`QueryDescriptor`] declares what a query wants from a world:
//!
//! 1. `required`: an entity matches only if it holds every one of these.
//! 2. `optional`: attached to matched rows when present; never gates a match.
//! 3. `excluded`: an entity holding any of these is skipped.
//!
//! Descriptors carry [`ComponentKey`]s rather than indices, so they can be
//! built before registration and even loaded from configuration. They are
//! resolved against a registry only when the query runs.

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentKey};

/// Describes which component types a query requires, attaches optionally,
/// and excludes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryDescriptor {
    /// Component types every matched entity must hold.
    pub required: Vec<ComponentKey>,
    /// Component types attached to a matched row when present.
    pub optional: Vec<ComponentKey>,
    /// Component types a matched entity must not hold.
    pub excluded: Vec<ComponentKey>,
}

impl QueryDescriptor {
    /// Create a new empty query descriptor. An empty descriptor matches nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A descriptor requiring exactly `keys`, with no optional or excluded types.
    #[must_use]
    pub fn required_only(keys: impl IntoIterator<Item = ComponentKey>) -> Self {
        Self {
            required: keys.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Add a required component type.
    #[must_use]
    pub fn require<T: Component>(self) -> Self {
        self.require_key(ComponentKey::of::<T>())
    }

    /// Add a required component type by name.
    #[must_use]
    pub fn require_named(self, name: &'static str) -> Self {
        self.require_key(ComponentKey::named(name))
    }

    #[must_use]
    pub fn require_key(mut self, key: ComponentKey) -> Self {
        self.required.push(key);
        self
    }

    /// Add an optional component type.
    #[must_use]
    pub fn optional<T: Component>(self) -> Self {
        self.optional_key(ComponentKey::of::<T>())
    }

    /// Add an optional component type by name.
    #[must_use]
    pub fn optional_named(self, name: &'static str) -> Self {
        self.optional_key(ComponentKey::named(name))
    }

    #[must_use]
    pub fn optional_key(mut self, key: ComponentKey) -> Self {
        self.optional.push(key);
        self
    }

    /// Add an excluded component type.
    #[must_use]
    pub fn exclude<T: Component>(self) -> Self {
        self.exclude_key(ComponentKey::of::<T>())
    }

    /// Add an excluded component type by name.
    #[must_use]
    pub fn exclude_named(self, name: &'static str) -> Self {
        self.exclude_key(ComponentKey::named(name))
    }

    #[must_use]
    pub fn exclude_key(mut self, key: ComponentKey) -> Self {
        self.excluded.push(key);
        self
    }

    /// Returns every key the query mentions (required, then optional, then excluded).
    pub fn all_keys(&self) -> impl Iterator<Item = &ComponentKey> {
        self.required
            .iter()
            .chain(&self.optional)
            .chain(&self.excluded)
    }
}
